pub mod annotate;
pub mod figure;

pub use annotate::annotate;
pub use figure::{compose_figure, FigureLayout};
