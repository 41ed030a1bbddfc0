pub mod board_view;
pub mod palette;
pub mod renderer;

pub use board_view::BoardView;
pub use renderer::Renderer;
