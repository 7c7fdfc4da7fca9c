// Health check fixture - free functions
/// @route('GET', '/health')
/// @desc(Service liveness)
pub async fn health() -> &'static str {
    "ok"
}

pub fn undocumented() {}
