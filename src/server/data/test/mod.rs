mod session;
mod session_store;
