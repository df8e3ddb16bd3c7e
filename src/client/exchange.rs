use tokio::io::{AsyncRead, AsyncWrite, BufReader};

use crate::error::Result;
use crate::http::parser::read_response;
use crate::http::request::Request;
use crate::http::response::FullResponse;
use crate::http::writer::RequestWriter;

/// Sends `request` over `stream` and reads the response, body included.
///
/// The stream is borrowed and left open; the caller drops it once this
/// returns. `request.headers` are updated in place (`Host`, `Connection`).
pub async fn exchange<S>(stream: &mut S, request: &mut Request) -> Result<FullResponse>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut writer = RequestWriter::new(request)?;
    writer.write_to_stream(stream).await?;

    tracing::trace!(method = %request.method, "Request sent, awaiting response");

    let mut reader = BufReader::new(stream);
    let response = read_response(&mut reader).await?;
    response.into_full().await
}
