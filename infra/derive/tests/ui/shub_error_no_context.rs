use shub_derive::shub_error;

#[shub_error]
pub enum UploadError {
    #[error("Upload failed: {source}")]
    Io { source: std::io::Error },
}

fn main() {}
