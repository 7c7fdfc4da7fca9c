// Users controller fixture - handlers documented with route annotations
use std::collections::HashMap;

pub struct UsersController {
    users: HashMap<u32, String>,
}

impl UsersController {
    /// Lists every user.
    ///
    /// @route("GET", "/users")
    /// @Auth("admin", "support")
    /// @middlewareBefore("cors", "session")
    /// @middlewareAfter('audit')
    /// @query("page", int)
    /// @?query("search", string)
    /// @response(200, 401)
    /// @version("1.2")
    /// @desc("List users")
    pub fn list(&self) -> Vec<String> {
        self.users.values().cloned().collect()
    }

    /// @route("GET", "/users/:id")
    /// @route("HEAD", "/users/:id")
    /// @param("id", int)
    /// @response(200)
    /// @response(404)
    pub fn show(&self, id: u32) -> Option<&String> {
        self.users.get(&id)
    }

    /// Creates a user.
    /// @route("POST",     "/users")
    /// @payload("name", string)
    /// @?payload("email", string)
    /// @deprecated(true)
    pub fn create(&mut self, name: String) {
        self.users.insert(self.users.len() as u32, name);
    }

    /// Internal helper without annotations.
    fn next_id(&self) -> u32 {
        self.users.len() as u32
    }
}
