//! Static gallery page rendering.
//!
//! Produces a single self-contained HTML document: a grid of cards, one per
//! published file, with client-side search, re-sorting and lazy PDF.js
//! thumbnails. Each card carries machine-readable `data-name` (lowercased),
//! `data-size` and `data-mtime` attributes so the embedded script can filter
//! and sort without another scan. Maud auto-escapes every interpolated value;
//! link targets are percent-encoded separately.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::format::{human_date, human_size};
use super::scan::PdfEntry;

/// Header brand dot colors: blue, red, green, near-black.
const DOT_COLORS: [&str; 4] = ["#2563eb", "#ef4444", "#22c55e", "#111827"];

const PDFJS_SRC: &str = "https://cdnjs.cloudflare.com/ajax/libs/pdf.js/4.10.38/pdf.min.js";
const PDFJS_WORKER_SRC: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/pdf.js/4.10.38/pdf.worker.min.js";

/// Render the complete gallery document.
pub fn render_index(entries: &[PdfEntry], brand: &str, title: &str, folder: &str) -> String {
    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (brand) " — " (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                div.wrap {
                    header {
                        div.brand {
                            div.dots title=(brand) {
                                @for c in DOT_COLORS {
                                    span.dot style=(format!("background:{c}")) {}
                                }
                            }
                            div.titles {
                                div.h1 { (brand) }
                                div.h2 { (title) }
                            }
                        }
                        div.controls {
                            div.search {
                                input id="q" type="text" placeholder="Search PDFs…" autocomplete="off";
                            }
                            select id="sort" {
                                option value="mtime_desc" selected="" { "Most recent" }
                                option value="name_asc" { "A–Z" }
                                option value="size_desc" { "Largest" }
                                option value="size_asc" { "Smallest" }
                            }
                            button.toggle id="thumbToggle" type="button" { "Thumbnails: On" }
                        }
                    }
                    div.bar {
                        div.bar-top {
                            div { span id="count" { (entries.len()) } " PDF(s)" }
                            div { "Folder: " code { (folder) } }
                        }
                        section.grid id="grid" {
                            @if entries.is_empty() {
                                div style="padding:10px;color:var(--muted)" { "No PDFs found." }
                            } @else {
                                @for entry in entries {
                                    (card(entry))
                                }
                            }
                        }
                    }
                }
                script src=(PDFJS_SRC) {}
                script {
                    (PreEscaped(format!(
                        "pdfjsLib.GlobalWorkerOptions.workerSrc = '{PDFJS_WORKER_SRC}';"
                    )))
                    (PreEscaped(SCRIPT))
                }
            }
        }
    };
    page.into_string()
}

/// One gallery card. The href is the percent-encoded file name so links work
/// for names with spaces or non-ASCII characters.
fn card(entry: &PdfEntry) -> Markup {
    let href = urlencoding::encode(&entry.name).into_owned();
    html! {
        article.card
            data-name=(entry.name.to_lowercase())
            data-size=(entry.size_bytes)
            data-mtime=(entry.modified_unix)
        {
            div.thumb title="Preview" {
                canvas.cv width="240" height="320" data-pdf=(href) {}
                div.thumb-fallback aria-hidden="true" { "PDF" }
            }
            div.card-body {
                a.fname href=(href) target="_blank" rel="noopener" { (entry.name) }
                div.meta { (human_size(entry.size_bytes)) " · " (human_date(entry.modified_unix)) }
                div.actions {
                    a.btn href=(href) target="_blank" rel="noopener" { "View" }
                    a.btn.ghost href=(href) download="" { "Download" }
                }
            }
        }
    }
}

const STYLE: &str = r#"
  :root {
    --bg:#ffffff;
    --text:#111827;
    --muted:#6b7280;
    --line:#e5e7eb;
    --soft:#f3f4f6;
    --chip:#eef2ff;
    --btn:#111827;
    --btnText:#ffffff;
    --shadow: 0 8px 24px rgba(17,24,39,.08);
  }

  *{box-sizing:border-box}
  body{margin:0;font-family:system-ui,-apple-system,Segoe UI,Roboto,Arial,sans-serif;background:var(--bg);color:var(--text)}
  .wrap{max-width:1160px;margin:0 auto;padding:14px 12px 26px}

  header{
    display:flex;align-items:center;justify-content:space-between;gap:10px;
    border:1px solid var(--line);background:#fff;border-radius:12px;padding:10px 12px;
  }
  .brand{display:flex;align-items:center;gap:10px;min-width:230px}
  .dots{display:flex;gap:6px;align-items:center;padding:6px 8px;border:1px solid var(--line);border-radius:999px;background:var(--soft)}
  .dot{width:9px;height:9px;border-radius:999px}
  .titles{line-height:1.1}
  .titles .h1{font-weight:750;font-size:15px;margin:0}
  .titles .h2{font-size:12px;color:var(--muted);margin-top:3px}

  .controls{display:flex;flex-wrap:wrap;gap:8px;justify-content:flex-end;align-items:center;width:min(640px,100%)}
  .search{display:flex;align-items:center;border:1px solid var(--line);border-radius:10px;padding:8px 10px;background:#fff;min-width:min(360px,100%)}
  .search input{width:100%;border:0;outline:0;font-size:13px}
  select{
    border:1px solid var(--line);border-radius:10px;padding:8px 10px;
    background:#fff;font-size:13px;color:var(--text);
  }
  .toggle{
    border:1px solid var(--line);border-radius:10px;padding:8px 10px;background:#fff;
    font-size:13px;color:var(--text); cursor:pointer;
  }

  .bar{
    margin-top:10px;border:1px solid var(--line);border-radius:12px;overflow:hidden;background:#fff;
  }
  .bar-top{
    display:flex;justify-content:space-between;align-items:center;
    padding:8px 10px;background:var(--soft);border-bottom:1px solid var(--line);
    font-size:12px;color:var(--muted);
  }

  .grid{
    display:grid;
    grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
    gap: 10px;
    padding: 10px;
  }

  .card{
    border:1px solid var(--line);
    border-radius:12px;
    overflow:hidden;
    background:#fff;
    box-shadow: var(--shadow);
    display:flex;
    flex-direction:column;
    min-height: 350px;
  }

  .thumb{
    position:relative;
    background: linear-gradient(180deg, #fff, #f8fafc);
    border-bottom:1px solid var(--line);
    height: 240px;
    display:flex;
    align-items:center;
    justify-content:center;
  }

  .cv{
    width: 100%;
    height: 100%;
    object-fit: contain;
    display:block;
  }

  .thumb-fallback{
    position:absolute;
    inset: 10px;
    border:1px dashed var(--line);
    border-radius:10px;
    display:flex;
    align-items:center;
    justify-content:center;
    color: var(--muted);
    font-weight: 700;
    letter-spacing: .8px;
    background: rgba(255,255,255,.6);
  }

  .card-body{padding:10px 10px 12px; display:flex; flex-direction:column; gap:6px; flex:1;}
  .fname{font-weight:700;font-size:13px;color:var(--text);text-decoration:none; line-height:1.2;}
  .fname:hover{text-decoration:underline}
  .meta{font-size:12px;color:var(--muted)}

  .actions{margin-top:auto; display:flex; gap:8px; padding-top:6px;}
  .btn{
    display:inline-flex;align-items:center;justify-content:center;
    padding:7px 10px;border-radius:10px;border:1px solid var(--btn);
    background:var(--btn);color:var(--btnText);text-decoration:none;font-size:12px;
  }
  .btn.ghost{background:#fff;color:var(--btn)}

  .hidden{display:none !important}

  @media (max-width: 520px){
    .search{min-width: 100%}
    .controls{justify-content:stretch}
    select,.toggle{flex:1}
  }
"#;

const SCRIPT: &str = r#"
    const q = document.getElementById('q');
    const sortSel = document.getElementById('sort');
    const grid = document.getElementById('grid');
    const countEl = document.getElementById('count');
    const thumbToggle = document.getElementById('thumbToggle');

    let thumbsOn = true;

    function cards() {
      return Array.from(grid.querySelectorAll('.card'));
    }

    function applyFilter() {
      const term = (q.value || '').trim().toLowerCase();
      let shown = 0;
      for (const c of cards()) {
        const name = c.dataset.name || '';
        const ok = !term || name.includes(term);
        c.classList.toggle('hidden', !ok);
        if (ok) shown++;
      }
      countEl.textContent = shown;
    }

    function sortCards() {
      const mode = sortSel.value;
      const list = cards();

      const cmpText = (a,b) => (a||'').localeCompare(b||'');
      const cmpNum  = (a,b) => (Number(a||0) - Number(b||0));

      list.sort((A,B) => {
        if (mode === 'mtime_desc') return -cmpNum(A.dataset.mtime, B.dataset.mtime);
        if (mode === 'name_asc')   return  cmpText(A.dataset.name, B.dataset.name);
        if (mode === 'size_desc')  return -cmpNum(A.dataset.size, B.dataset.size);
        if (mode === 'size_asc')   return  cmpNum(A.dataset.size, B.dataset.size);
        return 0;
      });

      for (const c of list) grid.appendChild(c);
    }

    q.addEventListener('input', applyFilter);
    sortSel.addEventListener('change', () => {
      sortCards();
      applyFilter();
    });

    thumbToggle.addEventListener('click', () => {
      thumbsOn = !thumbsOn;
      thumbToggle.textContent = 'Thumbnails: ' + (thumbsOn ? 'On' : 'Off');
      document.documentElement.style.setProperty('--shadow', thumbsOn ? '0 8px 24px rgba(17,24,39,.08)' : 'none');

      for (const cv of document.querySelectorAll('canvas.cv')) {
        cv.style.display = thumbsOn ? 'block' : 'none';
        cv.nextElementSibling.style.display = thumbsOn ? 'none' : 'flex';
      }
    });

    // Lazy PDF.js thumbnail rendering.
    const rendered = new Set();

    async function renderThumb(canvas) {
      if (!thumbsOn) return;
      const url = canvas.dataset.pdf;
      if (!url || rendered.has(url)) return;
      rendered.add(url);

      const fallback = canvas.nextElementSibling;

      try {
        const loadingTask = pdfjsLib.getDocument(url);
        const pdf = await loadingTask.promise;
        const page = await pdf.getPage(1);

        const desiredWidth = canvas.getBoundingClientRect().width || 240;
        const viewport1 = page.getViewport({ scale: 1 });
        const scale = desiredWidth / viewport1.width;
        const viewport = page.getViewport({ scale });

        canvas.width = Math.floor(viewport.width);
        canvas.height = Math.floor(viewport.height);

        const ctx = canvas.getContext('2d', { alpha: false });
        await page.render({ canvasContext: ctx, viewport }).promise;

        if (fallback) fallback.style.display = 'none';
      } catch (e) {
        if (fallback) fallback.style.display = 'flex';
      }
    }

    const io = new IntersectionObserver((entries) => {
      for (const e of entries) {
        if (e.isIntersecting) {
          const cv = e.target;
          renderThumb(cv);
          io.unobserve(cv);
        }
      }
    }, { rootMargin: "300px 0px" });

    function observeThumbs() {
      for (const cv of document.querySelectorAll('canvas.cv')) {
        cv.style.display = thumbsOn ? 'block' : 'none';
        const fb = cv.nextElementSibling;
        if (fb) fb.style.display = thumbsOn ? 'none' : 'flex';

        if (thumbsOn) io.observe(cv);
      }
    }

    sortCards();
    applyFilter();
    observeThumbs();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, size: u64, mtime: i64) -> PdfEntry {
        PdfEntry {
            name: name.to_string(),
            size_bytes: size,
            modified_unix: mtime,
        }
    }

    #[test]
    fn cards_carry_machine_readable_attributes() {
        let html = render_index(
            &[entry("Sheet One.pdf", 2048, 1_700_000_000)],
            "Brand",
            "PDF Gallery",
            "pdf",
        );
        assert!(html.contains(r#"data-name="sheet one.pdf""#));
        assert!(html.contains(r#"data-size="2048""#));
        assert!(html.contains(r#"data-mtime="1700000000""#));
        assert!(html.contains("2.0 KB"));
    }

    #[test]
    fn hrefs_are_percent_encoded() {
        let html = render_index(
            &[entry("maths révision 1.pdf", 10, 0)],
            "Brand",
            "PDF Gallery",
            "pdf",
        );
        assert!(html.contains("maths%20r%C3%A9vision%201.pdf"));
    }

    #[test]
    fn display_names_are_escaped() {
        let html = render_index(
            &[entry("a<b>.pdf", 10, 0)],
            "Brand & Co",
            "PDF Gallery",
            "pdf",
        );
        assert!(html.contains("a&lt;b&gt;.pdf"));
        assert!(html.contains("Brand &amp; Co"));
        assert!(!html.contains("<b>.pdf"));
    }

    #[test]
    fn empty_manifest_renders_placeholder() {
        let html = render_index(&[], "Brand", "PDF Gallery", "pdf");
        assert!(html.contains("No PDFs found."));
        assert!(html.contains(r#"<span id="count">0</span>"#));
    }
}
