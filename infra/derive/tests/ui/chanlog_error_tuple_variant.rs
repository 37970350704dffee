use chanlog_derive::chanlog_error;

#[chanlog_error]
pub enum DemoError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
}

fn main() {}
