use crate::error::Result;

/// Blocking transport used by the live feed client.
pub trait HttpClient {
    /// Issues a GET and returns the body of a successful response.
    fn get_text(&self, url: &str) -> Result<String>;
}
