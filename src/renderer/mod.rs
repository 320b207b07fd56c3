pub mod options;
pub mod renderer;
pub mod styler;

pub use options::*;
pub use renderer::*;
pub use styler::*;
