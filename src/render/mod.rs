pub mod frontend;
pub mod renderer;
pub mod terminal;

pub use frontend::{Control, Frontend, HeadlessFrontend, Speed};
pub use renderer::Renderer;
pub use terminal::TerminalFrontend;
