//! Server-side HTML rendering for the two views.
//!
//! Every piece of user- or model-provided text goes through [`escape_html`].

use moodlens_core::{FeedbackChoice, LabelCatalog, PrimaryResult, ResultSet};

pub const PAGE_TITLE: &str = "🧠 Mental Health Text Classifier";

/// A banner shown above the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Error(String),
    Success(String),
}

impl Notice {
    fn class(&self) -> &'static str {
        match self {
            Self::Warning(_) => "notice warning",
            Self::Error(_) => "notice error",
            Self::Success(_) => "notice success",
        }
    }

    fn text(&self) -> &str {
        match self {
            Self::Warning(t) | Self::Error(t) | Self::Success(t) => t,
        }
    }
}

/// Everything the analysis view needs.
#[derive(Debug, Default)]
pub struct AnalysisView<'a> {
    /// Text to pre-fill the input with.
    pub input: &'a str,
    pub notice: Option<Notice>,
    pub results: Option<&'a ResultSet>,
    /// Shown as a hint only; the limit is enforced server-side.
    pub max_input_chars: usize,
}

pub fn landing_page() -> String {
    let body = format!(
        r#"<h1>{title}</h1>
<h3>AI-powered Mental Health Text Analyzer</h3>
<hr>
<p class="disclaimer">⚠ <em>Disclaimer: This tool is for <strong>research/educational purposes only</strong>.
It is <strong>not a substitute for professional medical advice, diagnosis, or treatment</strong>.</em></p>
<br>
<p>Analyze emotional and mental health cues from your text using AI 🧩.</p>
<br>
<form method="post" action="/start">
  <button type="submit" id="get-started">🚀 Get Started</button>
</form>"#,
        title = escape_html(PAGE_TITLE),
    );
    layout(&body)
}

pub fn analysis_page(view: &AnalysisView<'_>, catalog: &LabelCatalog) -> String {
    let mut body = format!(
        r#"<h2>💬 Enter Your Text</h2>
<p>Provide a paragraph, message, or post you'd like to analyze.</p>
<form method="post" action="/analyze">
  <label for="text">🧾 Paste text here:</label>
  <textarea id="text" name="text" rows="7">{input}</textarea>
  <p class="hint">Up to {max} characters.</p>
  <button type="submit" id="analyze">🔎 Analyze</button>
</form>
"#,
        max = view.max_input_chars,
        input = escape_html(view.input),
    );

    if let Some(notice) = &view.notice {
        body.push_str(&notice_html(notice));
    }

    if let Some(results) = view.results {
        body.push_str(&results_html(results, catalog));
        body.push_str(&feedback_html());
    }

    layout(&body)
}

fn notice_html(notice: &Notice) -> String {
    format!(
        "<div class=\"{}\" role=\"alert\">{}</div>\n",
        notice.class(),
        escape_html(notice.text())
    )
}

fn results_html(results: &ResultSet, catalog: &LabelCatalog) -> String {
    let primary = PrimaryResult::derive(results, catalog);

    let mut html = format!(
        r#"<hr>
<div class="notice success primary" data-band="{band}">
  <h3>✅ Primary Result: <em>{label}</em> detected (Confidence: {confidence})</h3>
</div>
<h3>🧩 Explanation of Findings</h3>
<div class="notice info explanation">{explanation}</div>
<h3>📊 Confidence Distribution:</h3>
<ul class="distribution">
"#,
        band = primary.band.as_str(),
        label = escape_html(&primary.label),
        confidence = primary.confidence,
        explanation = escape_html(&primary.explanation),
    );

    for result in results {
        let band = catalog.band(&result.label);
        html.push_str(&format!(
            r#"  <li class="row {band}" data-band="{band}" data-progress="{progress}">
    <span class="indicator">{indicator}</span> <strong>{label}</strong> ({confidence})
    <progress max="100" value="{progress}">{progress}%</progress>
  </li>
"#,
            band = band.as_str(),
            indicator = band.indicator(),
            label = escape_html(&result.label),
            confidence = result.confidence_display(),
            progress = result.progress(),
        ));
    }

    html.push_str("</ul>\n");
    html
}

fn feedback_html() -> String {
    let correct = FeedbackChoice::Correct;
    let incorrect = FeedbackChoice::Incorrect;

    // The default choice is pre-selected.
    format!(
        r#"<hr>
<h3>💬 Feedback</h3>
<p>Did the AI get it right? Help us improve the model by sharing your feedback 👇</p>
<form method="post" action="/feedback" class="feedback">
  <div class="columns">
    <fieldset>
      <legend>Model's prediction was:</legend>
      <label><input type="radio" name="choice" value="{c}"{c_checked}> {c_caption}</label>
      <label><input type="radio" name="choice" value="{i}"{i_checked}> {i_caption}</label>
    </fieldset>
    <div>
      <label for="corrected_label">If incorrect, what should it be? (Optional)</label>
      <input type="text" id="corrected_label" name="corrected_label">
    </div>
  </div>
  <label for="comment">Any additional comments or notes:</label>
  <textarea id="comment" name="comment" rows="3"></textarea>
  <button type="submit" id="submit-feedback">📨 Submit Feedback</button>
</form>
"#,
        c = correct.as_str(),
        c_caption = correct.caption(),
        c_checked = checked(correct),
        i = incorrect.as_str(),
        i_caption = incorrect.caption(),
        i_checked = checked(incorrect),
    )
}

fn checked(choice: FeedbackChoice) -> &'static str {
    if choice == FeedbackChoice::default() {
        " checked"
    } else {
        ""
    }
}

fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<main class="main">
{body}
</main>
</body>
</html>
"#,
        title = escape_html(PAGE_TITLE),
    )
}

const STYLE: &str = r#"
body {
    background: linear-gradient(135deg, #EEF2FF 0%, #E0EAFC 100%);
    font-family: 'Segoe UI', sans-serif;
    color: #1A1A1A;
    margin: 0;
    min-height: 100vh;
}
h1, h2, h3, h4 { text-align: center; color: #2C3E50; font-weight: 700; }
.main {
    max-width: 730px;
    margin: 2rem auto;
    background-color: white;
    border-radius: 16px;
    padding: 2rem;
    box-shadow: 0 4px 20px rgba(0, 0, 0, 0.05);
}
textarea, input[type=text] {
    width: 100%;
    box-sizing: border-box;
    border-radius: 12px;
    border: 1px solid #D1D9E6;
    font-size: 1.05em;
    padding: 0.8em;
    background-color: #FAFBFF;
    color: #2C3E50;
}
button {
    background: linear-gradient(90deg, #5A60F2, #7B61FF);
    color: white;
    border-radius: 10px;
    padding: 0.6em 1.4em;
    border: none;
    font-weight: 600;
    margin-top: 0.8em;
    box-shadow: 0 3px 6px rgba(90, 96, 242, 0.3);
    transition: all 0.25s ease;
    cursor: pointer;
}
button:hover {
    background: linear-gradient(90deg, #4A50E0, #6B50F5);
    transform: translateY(-2px);
    box-shadow: 0 6px 12px rgba(90, 96, 242, 0.4);
}
.notice { border-radius: 12px; padding: 1.2em; margin: 1em 0; }
.notice.success { background-color: #E8F9F1; border: 1px solid #B3E6D4; color: #006644; }
.notice.warning { background-color: #FFF5E5; border: 1px solid #FFD580; color: #663C00; }
.notice.error { background-color: #FDECEC; border: 1px solid #F5B5B5; color: #8A1F1F; }
.notice.info { background-color: #EEF4FF; border: 1px solid #C9D8F5; color: #1F3A6B; }
.distribution { list-style: none; padding: 0; }
.distribution li { margin-bottom: 1em; }
progress { width: 100%; height: 0.8em; accent-color: #5A60F2; }
label { font-weight: 600; color: #2C3E50; display: block; margin-top: 0.6em; }
fieldset label { font-weight: 400; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 1em; }
.disclaimer { text-align: center; }
.hint { font-size: 0.85em; color: #5A6B7F; margin: 0.3em 0 0; }
"#;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
