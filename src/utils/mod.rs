pub mod formatter;

pub use formatter::ResponseRenderer;
