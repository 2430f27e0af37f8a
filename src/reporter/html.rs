//! HTML reporter: renders suites and cases into one self-contained page
//!
//! Styles and the toggle script are inlined; the only external resource is
//! the stylesheet link. Output is deterministic for a given input, source
//! tree and [`ReportMeta`].

use crate::error::Result;
use crate::snippet::{escape_html, SnippetResolver};
use crate::{CaseResult, SuiteResult, Totals};

/// Values rendered into the page that do not come from the results file
#[derive(Debug, Clone)]
pub struct ReportMeta {
    /// Project name in the heading
    pub title: String,
    pub stylesheet_url: String,
    /// Preformatted generation timestamp for the footer
    pub generated_at: String,
}

/// Assembled document plus what was learned while assembling it
#[derive(Debug, Clone)]
pub struct Report {
    pub html: String,
    pub totals: Totals,
    /// Case names whose snippet lookup came back empty, in render order
    pub missing_snippets: Vec<String>,
}

/// Reporter that generates the static results page
pub struct HtmlReporter<'a> {
    resolver: &'a SnippetResolver,
}

impl<'a> HtmlReporter<'a> {
    pub fn new(resolver: &'a SnippetResolver) -> Self {
        Self { resolver }
    }

    /// Generate the full HTML report
    pub fn report(&self, suites: &[SuiteResult], meta: &ReportMeta) -> Result<Report> {
        let totals = Totals::from_suites(suites)?;
        let rate = totals.success_rate_label();
        let mut missing_snippets = Vec::new();

        let mut body = String::new();
        for suite in suites {
            body.push_str(&self.render_suite(suite, &mut missing_snippets)?);
        }

        let mut html = String::with_capacity(16_384 + body.len());
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
        html.push_str(&format!(
            "<title>{} Test Results</title>\n",
            escape_html(&meta.title)
        ));
        html.push_str(&format!(
            "<link rel=\"stylesheet\" href=\"{}\">\n",
            escape_html(&meta.stylesheet_url)
        ));
        html.push_str(Self::template_style());
        html.push_str("</head>\n<body>\n<div class=\"container\">\n");
        html.push_str(&format!(
            "<h1>{} <span class=\"light\">results</span></h1>\n",
            escape_html(&meta.title)
        ));
        html.push_str(&Self::render_summary(&totals, &rate));
        html.push_str("<div class=\"test-results\">\n");
        html.push_str(&body);
        html.push_str("</div>\n");
        html.push_str(&format!(
            "<div class=\"timestamp\">Generated on {}</div>\n",
            escape_html(&meta.generated_at)
        ));
        html.push_str("</div>\n");
        html.push_str(Self::template_script());
        html.push_str("</body>\n</html>\n");

        Ok(Report {
            html,
            totals,
            missing_snippets,
        })
    }

    fn render_summary(totals: &Totals, rate: &str) -> String {
        format!(
            r#"<div class="summary-card">
<h2 class="title is-4">Summary</h2>
<div class="progress"><div class="progress-bar" style="width: {rate}%;"></div></div>
<div class="summary-stats">
<div class="stat-card"><div class="stat-value">{total}</div><div class="stat-label">Total Tests</div></div>
<div class="stat-card"><div class="stat-value has-text-success">{passed}</div><div class="stat-label">Passed</div></div>
<div class="stat-card"><div class="stat-value has-text-danger">{failed}</div><div class="stat-label">Failed</div></div>
<div class="stat-card"><div class="stat-value">{rate}%</div><div class="stat-label">Success Rate</div></div>
</div>
</div>
"#,
            rate = rate,
            total = totals.total,
            passed = totals.passed,
            failed = totals.failed,
        )
    }

    fn render_suite(&self, suite: &SuiteResult, missing: &mut Vec<String>) -> Result<String> {
        let (status_class, status_text) = if suite.success {
            ("is-success", "✓ Passed")
        } else {
            ("is-danger", "✗ Failed")
        };

        let mut cases = String::new();
        for case in suite.cases.iter().flatten() {
            cases.push_str(&self.render_case(case, missing)?);
        }

        Ok(format!(
            r#"<div class="test-suite">
<div class="test-suite-header">
<div class="test-suite-title"><h3>{name}</h3><span class="tag {status_class}">{status_text}</span></div>
<p class="test-suite-description">{description}</p>
<div class="test-stats">
<span class="stat"><span class="has-text-success">{passed}</span> passed</span>
<span class="stat"><span class="has-text-danger">{failed}</span> failed</span>
<span class="stat">{total} total</span>
</div>
</div>
<div class="test-cases">
{cases}</div>
</div>
"#,
            name = escape_html(&suite.name),
            status_class = status_class,
            status_text = status_text,
            description = escape_html(&suite.description),
            passed = suite.passed,
            failed = suite.failed,
            total = suite.total,
            cases = cases,
        ))
    }

    fn render_case(&self, case: &CaseResult, missing: &mut Vec<String>) -> Result<String> {
        let (status, icon) = if case.passed {
            ("success", "✓")
        } else {
            ("danger", "✗")
        };

        let snippet = self.resolver.find(&case.name)?;
        if !snippet.is_found() {
            missing.push(case.name.clone());
        }

        let error = if case.error.is_empty() {
            String::new()
        } else {
            format!(
                "<div class=\"error-message\">Error: {}</div>\n",
                escape_html(&case.error)
            )
        };

        Ok(format!(
            r#"<div class="test-case">
<div class="test-case-header" onclick="toggleCode(this)">
<span class="test-case-status has-text-{status}">{icon}</span>
<span class="test-case-name">{name}</span>
<span class="test-case-description">{description}</span>
<span class="toggle-icon">▼</span>
</div>
<div class="test-case-code" style="display: none;">
{code}
{error}</div>
</div>
"#,
            status = status,
            icon = icon,
            name = escape_html(&case.name),
            description = escape_html(&case.description),
            code = snippet.render(),
            error = error,
        ))
    }

    // ─── HTML template pieces ────────────────────────────────────────────

    fn template_style() -> &'static str {
        r##"<style>
:root{--bg-dark:#1a1e2c;--bg-darker:#0f1322;--bg-card:#242a3a;--text-primary:#e5e9f0;--text-secondary:#a0a8b9;--border-color:#2e3440;--success-color:#5cb85c;--danger-color:#d9534f;--code-bg:#1e2434;--line-number-color:#4a5268;--keyword-color:#81a1c1;--string-color:#a3be8c;--number-color:#b48ead}
body{background-color:var(--bg-dark);color:var(--text-primary);font-family:'JetBrains Mono','Fira Code',monospace;padding:2rem;min-height:100vh}
.container{max-width:1200px;margin:0 auto}
h1{font-size:2.5rem;font-weight:600;margin-bottom:1rem;color:var(--text-primary)}
h1 .light{color:var(--text-secondary);font-weight:300}

/* ── Summary ── */
.summary-card{background:linear-gradient(135deg,var(--bg-card),var(--bg-darker));border-radius:12px;padding:2rem;margin-bottom:2rem;box-shadow:0 4px 20px rgba(0,0,0,.3);border:1px solid var(--border-color)}
.summary-card .title{color:var(--text-primary)}
.summary-stats{display:grid;grid-template-columns:repeat(auto-fit,minmax(200px,1fr));gap:1.5rem;margin-top:1.5rem}
.stat-card{text-align:center;padding:1rem;background:rgba(0,0,0,.2);border-radius:8px;border:1px solid var(--border-color)}
.stat-value{font-size:2.5rem;font-weight:700;line-height:1.2}
.stat-label{color:var(--text-secondary);font-size:.9rem;text-transform:uppercase;letter-spacing:1px}
.progress{height:8px;background:var(--bg-darker);border-radius:4px;overflow:hidden;margin:1rem 0}
.progress-bar{height:100%;background:linear-gradient(90deg,var(--success-color),#8cc084);border-radius:4px;transition:width .3s ease}

/* ── Suites ── */
.test-suite{background:var(--bg-card);border-radius:10px;margin-bottom:1.5rem;overflow:hidden;border:1px solid var(--border-color);box-shadow:0 2px 8px rgba(0,0,0,.2)}
.test-suite-header{padding:1.5rem;border-bottom:1px solid var(--border-color);background:rgba(0,0,0,.2)}
.test-suite-title{display:flex;align-items:center;justify-content:space-between;margin-bottom:.5rem}
.test-suite-title h3{font-size:1.3rem;font-weight:600;color:var(--text-primary);margin:0}
.test-suite-description{color:var(--text-secondary);margin:.5rem 0;font-size:.95rem}
.test-stats{display:flex;gap:1rem;font-size:.9rem}
.stat{color:var(--text-secondary)}

/* ── Cases ── */
.test-cases{padding:.5rem}
.test-case{margin:.5rem;background:var(--bg-darker);border-radius:6px;border:1px solid var(--border-color)}
.test-case-header{padding:1rem;cursor:pointer;display:flex;align-items:center;gap:1rem;transition:background .2s}
.test-case-header:hover{background:rgba(255,255,255,.05)}
.test-case-status{font-weight:700;min-width:24px}
.test-case-name{font-weight:600;color:var(--text-primary);min-width:200px}
.test-case-description{color:var(--text-secondary);flex:1;font-size:.9rem}
.toggle-icon{color:var(--text-secondary);font-size:.8rem;transition:transform .3s}

/* ── Code viewer ── */
.test-case-code{padding:1rem;border-top:1px solid var(--border-color);background:var(--code-bg);font-family:'JetBrains Mono','Fira Code',monospace;font-size:.85rem;line-height:1.5;overflow-x:auto}
.code-line{display:flex;white-space:pre;color:#d8dee9}
.line-number{color:var(--line-number-color);padding-right:1.5rem;text-align:right;user-select:none;min-width:40px;border-right:1px solid var(--border-color);margin-right:1rem}
.keyword{color:var(--keyword-color);font-weight:600}
.string{color:var(--string-color)}
.number{color:var(--number-color)}
.error-message{margin-top:1rem;padding:1rem;background:rgba(217,83,79,.1);border:1px solid var(--danger-color);border-radius:4px;color:var(--danger-color);font-family:monospace}

/* ── Utility ── */
.tag{font-size:.8rem;padding:.4rem .8rem;border-radius:4px;font-weight:600}
.tag.is-success{background:var(--success-color);color:#fff}
.tag.is-danger{background:var(--danger-color);color:#fff}
.has-text-success{color:var(--success-color)!important}
.has-text-danger{color:var(--danger-color)!important}
.timestamp{text-align:right;color:var(--text-secondary);font-size:.85rem;margin-top:2rem;padding-top:1rem;border-top:1px solid var(--border-color)}
::-webkit-scrollbar{width:10px;height:10px}
::-webkit-scrollbar-track{background:var(--bg-darker)}
::-webkit-scrollbar-thumb{background:var(--border-color);border-radius:5px}
::-webkit-scrollbar-thumb:hover{background:#4a5268}
</style>
"##
    }

    fn template_script() -> &'static str {
        r##"<script>
function toggleCode(header){
  const code=header.nextElementSibling;
  const icon=header.querySelector('.toggle-icon');
  if(code.style.display==='none'){
    code.style.display='block';
    icon.textContent='▲';
  }else{
    code.style.display='none';
    icon.textContent='▼';
  }
}

/* ── expand failed cases on load ── */
document.querySelectorAll('.test-case').forEach(c=>{
  const status=c.querySelector('.test-case-status');
  if(status&&status.classList.contains('has-text-danger')){
    const code=c.querySelector('.test-case-code');
    const icon=c.querySelector('.toggle-icon');
    if(code){
      code.style.display='block';
      if(icon) icon.textContent='▲';
    }
  }
});
</script>
"##
    }
}
