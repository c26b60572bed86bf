//! HTTP seam between the gateway and the network.
//!
//! The `Transport` trait lets the gateway run against a real HTTP client in
//! production and a recording stub in tests.

use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use tracing::trace;

use crate::args::{ArgValue, Args, InputFile};
use crate::error::Result;

/// Sends raw requests to the Bot API.
///
/// Implementations return the response body regardless of the HTTP status:
/// the platform describes failures in the JSON body itself.
pub trait Transport: Send + Sync {
    /// POSTs `args` to `url` and returns the response body.
    ///
    /// Bodies are form-encoded, or multipart when `args` carries a file.
    fn post(&self, url: &str, args: &Args) -> Result<String>;

    /// GETs `url` and returns the raw bytes.
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking `reqwest` transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Creates a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &str, args: &Args) -> Result<String> {
        let request = self.client.post(url);
        let request = if args.has_files() {
            trace!(fields = args.len(), "Sending multipart request");
            request.multipart(multipart_form(args)?)
        } else {
            trace!(fields = args.len(), "Sending form request");
            request.form(&args.form_fields())
        };

        let response = request.send()?;
        Ok(response.text()?)
    }

    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

fn multipart_form(args: &Args) -> Result<Form> {
    let mut form = Form::new();
    for (key, value) in args.iter() {
        form = match value {
            ArgValue::File(InputFile::Path(path)) => form.file(key.to_string(), path)?,
            ArgValue::File(InputFile::Memory { file_name, bytes }) => form.part(
                key.to_string(),
                Part::bytes(bytes.clone()).file_name(file_name.clone()),
            ),
            ArgValue::Json(_) => match value.form_text() {
                Some(text) => form.text(key.to_string(), text),
                None => form,
            },
        };
    }
    Ok(form)
}
