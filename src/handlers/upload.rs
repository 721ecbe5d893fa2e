use crate::pipeline::PipelineOutcome;
use crate::views::render_page;
use axum::{
    extract::{Multipart, State},
    response::Html,
};
use futures::TryStreamExt;
use tokio::io::AsyncReadExt;
use tokio_util::io::StreamReader;

/// Serve the upload form
pub async fn show_form() -> Html<String> {
    Html(render_page(None))
}

/// Accept a multipart upload, run it through the pipeline and render the
/// outcome. The transport-level response is always 200; failures are carried
/// in the page body, never as HTTP errors.
pub async fn upload_file(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> Html<String> {
    let mut outcome: Option<PipelineOutcome> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Malformed multipart body: {:?}", e);
                outcome = Some(PipelineOutcome::UnexpectedError {
                    cause: e.to_string(),
                });
                break;
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("unnamed").to_string();

        let body_with_io_error =
            field.map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err));
        let mut reader = StreamReader::new(body_with_io_error);

        // The body limit caps uploads at a few MB, so buffer the field before
        // handing an owned stream to the pipeline.
        let mut data = Vec::new();
        if let Err(e) = reader.read_to_end(&mut data).await {
            tracing::error!("Failed reading upload stream for '{}': {:?}", filename, e);
            outcome = Some(PipelineOutcome::UnexpectedError {
                cause: e.to_string(),
            });
            break;
        }

        let stream = Box::pin(std::io::Cursor::new(data));
        outcome = Some(state.pipeline.run(&filename, stream).await);
        break;
    }

    let outcome = outcome.unwrap_or(PipelineOutcome::ValidationRejected);
    Html(render_page(Some(&outcome)))
}
