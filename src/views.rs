use crate::pipeline::PipelineOutcome;

/// Shell of the upload page; `{alert}` is replaced with the outcome alert.
const PAGE_TEMPLATE: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>File Processing with AWS Textract and Polly</title>
  <link href="https://stackpath.bootstrapcdn.com/bootstrap/4.5.2/css/bootstrap.min.css" rel="stylesheet">
  <style>
    body { background: linear-gradient(to right, #6a11cb 0%, #2575fc 100%); color: #fff; }
    .container, .navbar { max-width: 1200px; margin: auto; }
    .card { margin-top: 2rem; background-color: rgba(255, 255, 255, 0.9); }
    .navbar .nav-link { color: #fff !important; }
    section { padding: 2rem 0; }
    .white { color: #000; background-color: rgba(255, 255, 255, 0.8); padding: 20px; border-radius: 8px; margin-bottom: 20px; }
  </style>
</head>
<body>
  <nav class="navbar navbar-expand-lg navbar-dark">
    <a class="navbar-brand" href="#">AWS Services</a>
    <div class="collapse navbar-collapse" id="navbarNav">
      <ul class="navbar-nav">
        <li class="nav-item"><a class="nav-link" href="#textract">Textract</a></li>
        <li class="nav-item"><a class="nav-link" href="#polly">Polly</a></li>
      </ul>
    </div>
  </nav>

  <div class="container">
    <section id="upload">
      <div class="card">
        <div class="card-body">
          <h1 class="card-title mb-4">Upload a File</h1>
          <form action="/" method="post" enctype="multipart/form-data">
            <div class="custom-file mb-4">
              <input type="file" class="custom-file-input" name="file" id="file">
              <label class="custom-file-label" for="file">Choose file</label>
            </div>
            <button type="submit" class="btn btn-dark btn-block">Upload</button>
          </form>
          {alert}
        </div>
      </div>
    </section>

    <section id="info" class="white">
      <h2>How It Works</h2>
      <p>Upload a PDF, JPEG or PNG document (up to 10MB). The text is extracted
      with AWS Textract and converted into natural-sounding speech with AWS
      Polly.</p>
    </section>

    <section id="textract" class="white">
      <h2>AWS Textract</h2>
      <p>AWS Textract is a fully managed machine learning service that automatically extracts text, handwriting, and data from scanned documents.</p>
    </section>

    <section id="polly" class="white">
      <h2>AWS Polly</h2>
      <p>AWS Polly is a cloud service that turns text into lifelike speech, offering dozens of voices across a broad range of languages.</p>
    </section>
  </div>
</body>
</html>
"##;

/// Render the upload page, optionally embedding the outcome of a run
pub fn render_page(outcome: Option<&PipelineOutcome>) -> String {
    let alert = match outcome {
        None => String::new(),
        Some(outcome) => {
            let class = if outcome.is_success() {
                "alert alert-success"
            } else {
                "alert alert-danger"
            };
            format!(
                r#"<div class="{}" role="alert">{}</div>"#,
                class,
                escape_html(&outcome.user_message())
            )
        }
    };

    PAGE_TEMPLATE.replace("{alert}", &alert)
}

/// Minimal HTML escaping for text interpolated into the page. The display
/// name comes from a client-supplied filename, so it cannot be trusted.
fn escape_html(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            other => other.to_string(),
        })
        .collect()
}
