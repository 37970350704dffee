use chanlog_derive::chanlog_error;

#[chanlog_error]
pub enum DemoError {
    #[error("IO error: {source}")]
    Io {
        source: std::io::Error,
        context: Option<String>,
    },
}

fn main() {}
