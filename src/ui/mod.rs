pub mod render;
pub mod terminal;
pub mod tool_calls;
