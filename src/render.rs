//! Server-side card rendering for `/api/cards`. Mirrors the markup the static
//! frontend builds in `static/script.js`.

use crate::data_models::ScoredCandidate;

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x280?text=No+Image";

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Similarity as a percentage with one decimal, e.g. 0.8734 -> 87.3.
pub fn similarity_percent(similarity: f64) -> f64 {
    (similarity * 1000.0).round() / 10.0
}

pub fn render_card(item: &ScoredCandidate) -> String {
    let c = &item.candidate;
    let image = if c.image.is_empty() {
        PLACEHOLDER_IMAGE
    } else {
        c.image.as_str()
    };
    let price = if c.price.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="price-line">${}</div>"#, escape_html(&c.price))
    };
    let sim = item
        .similarity
        .map(|s| format!("· sim {}%", similarity_percent(s)))
        .unwrap_or_default();

    format!(
        r#"<article class="card">
  <a href="{link}" target="_blank" rel="noopener noreferrer">
    <img src="{image}" alt="{title}" />
  </a>
  <div class="card-body">
    <h3>{title}</h3>
    <p class="snippet">{snippet}</p>
    {price}
    <div class="meta">
      <span class="badge">score {score}</span>
      <div class="sim">{sim}</div>
    </div>
  </div>
</article>
"#,
        link = escape_html(&c.link),
        image = escape_html(image),
        title = escape_html(&c.title),
        snippet = escape_html(&c.snippet),
        price = price,
        score = item.score,
        sim = sim,
    )
}

pub fn render_cards(items: &[ScoredCandidate], warning: Option<&str>) -> String {
    if items.is_empty() {
        let status = warning.unwrap_or("No results found.");
        return format!(r#"<p class="status">{}</p>"#, escape_html(status));
    }
    let mut html = String::new();
    if let Some(warning) = warning {
        html.push_str(&format!(
            "<p class=\"status\">{}</p>\n",
            escape_html(warning)
        ));
    }
    for item in items {
        html.push_str(&render_card(item));
    }
    html
}

pub fn render_error(message: &str) -> String {
    format!(r#"<p class="error">Error: {}</p>"#, escape_html(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_models::Candidate;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#039;Jerry&#039;&lt;/b&gt;"
        );
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn similarity_one_decimal() {
        assert_eq!(similarity_percent(0.8734), 87.3);
        assert_eq!(similarity_percent(1.0), 100.0);
    }

    #[test]
    fn card_escapes_upstream_text() {
        let c = Candidate::new(
            "<script>alert(1)</script>",
            "https://x.test/?a=1&b=\"2\"",
            "fine",
        );
        let html = render_card(&ScoredCandidate::new(c, 2.0));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a=1&amp;b=&quot;2&quot;"));
        assert!(html.contains(PLACEHOLDER_IMAGE));
        assert!(html.contains("score 2"));
        assert!(!html.contains("price-line"));
    }

    #[test]
    fn card_shows_price_and_similarity() {
        let mut c = Candidate::new("Boot", "https://x.test", "A sturdy boot for hiking");
        c.price = "59.00".into();
        c.image = "https://img.test/boot.jpg".into();
        let item = ScoredCandidate {
            candidate: c,
            score: 1.37,
            similarity: Some(0.5),
        };
        let html = render_card(&item);
        assert!(html.contains(r#"<div class="price-line">$59.00</div>"#));
        assert!(html.contains("sim 50%"));
        assert!(html.contains("https://img.test/boot.jpg"));
    }

    #[test]
    fn empty_list_renders_status() {
        assert_eq!(
            render_cards(&[], None),
            r#"<p class="status">No results found.</p>"#
        );
    }

    #[test]
    fn warning_precedes_cards() {
        let items = vec![
            ScoredCandidate::unranked(Candidate::new("First", "https://a.test", "one")),
            ScoredCandidate::unranked(Candidate::new("Second", "https://b.test", "two")),
        ];
        let html = render_cards(&items, Some("Ranking <unavailable>"));
        assert!(html.starts_with("<p class=\"status\">Ranking &lt;unavailable&gt;</p>\n"));
        assert_eq!(html.matches(r#"<article class="card">"#).count(), 2);
        assert!(html.find("First").unwrap() < html.find("Second").unwrap());
    }
}
