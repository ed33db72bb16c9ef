// Conversion service client module
//
// Sends the selected PDFs to the conversion service as a multipart POST
// and hands the raw response back to the upload workflow.

pub mod client;
pub mod error;

#[cfg(test)]
pub(crate) mod test_server;
