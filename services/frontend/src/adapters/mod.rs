pub mod backend_http;
pub mod session_memory;

pub use backend_http::HttpBackendAdapter;
pub use session_memory::MemorySessionStore;
