use aavebanks::{Dashboard, DisplayWindow, Entry};
use chrono::{DateTime, Utc};

const STYLE: &str = r#"
body { margin: 0; min-height: 100vh; font-family: system-ui, sans-serif; color: #fff;
       background: linear-gradient(135deg, #2b1055 0%, #7597de 100%); }
.container { max-width: 960px; margin: 0 auto; padding: 48px 24px; }
h1 { font-size: 3rem; margin: 0 0 16px; }
.lead { font-size: 1.4rem; opacity: 0.8; margin: 0 0 24px; }
.meta { display: flex; justify-content: space-between; gap: 16px; font-size: 0.85rem; opacity: 0.6; margin-bottom: 32px; }
.meta a, .retry { color: #fff; background: rgba(255,255,255,0.2); padding: 6px 14px; border-radius: 8px; text-decoration: none; }
table { width: 100%; border-collapse: collapse; background: rgba(255,255,255,0.08); border-radius: 16px; overflow: hidden; }
th, td { padding: 18px 28px; text-align: left; border-bottom: 1px solid rgba(255,255,255,0.1); }
th { opacity: 0.8; font-weight: 500; }
td.deposits, th.deposits { text-align: right; }
tr.aave { background: rgba(255,255,255,0.12); }
.name { display: flex; align-items: center; gap: 12px; }
.name img { width: 28px; height: 28px; border-radius: 50%; }
.footer { margin-top: 32px; text-align: center; opacity: 0.6; font-size: 0.85rem; }
"#;

/// Renders the ranked table around the Aave row. `now` seeds the refresh
/// link's cache-busting token.
pub fn render_dashboard_page(
    dashboard: &Dashboard,
    window: DisplayWindow,
    now: DateTime<Utc>,
) -> String {
    let ranking = &dashboard.ranking;
    let shown = window.select(&ranking.entries, ranking.aave_index());

    let lead = match ranking.aave_rank {
        Some(rank) => format!("Aave ranks #{rank} among U.S. banks by deposit size."),
        None => "Aave compared with top U.S. banks by deposit size.".to_string(),
    };
    let rows: String = shown.iter().map(render_row).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Aave vs Banks</title>
<style>{STYLE}</style>
</head>
<body>
<div class="container">
<h1>Aave vs Banks</h1>
<p class="lead">{lead}</p>
<div class="meta">
<span>Source: {source}</span>
<span>Last updated: {updated} <a href="{refresh}" title="Refresh data">Refresh</a></span>
</div>
<table>
<thead><tr><th>Rank</th><th>Name</th><th class="deposits">Deposits</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
<div class="footer">
<p>Aave data from DeFiLlama API. Showing {shown} of {total} entries.</p>
</div>
</div>
</body>
</html>
"#,
        source = escape_html(&dashboard.source),
        updated = escape_html(&display_time(&dashboard.last_updated)),
        refresh = refresh_href(now),
        shown = shown.len(),
        total = ranking.entries.len(),
    )
}

/// Error page with a retry link.
pub fn render_error_page(message: &str, now: DateTime<Utc>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Aave vs Banks</title>
<style>{STYLE}</style>
</head>
<body>
<div class="container">
<p class="lead">Error: {message}</p>
<a class="retry" href="{refresh}">Try Again</a>
</div>
</body>
</html>
"#,
        message = escape_html(message),
        refresh = refresh_href(now),
    )
}

fn render_row(entry: &Entry) -> String {
    let class = if entry.is_aave { r#" class="aave""# } else { "" };
    let logo = match (&entry.logo, entry.is_aave) {
        (Some(logo), true) => format!(r#"<img src="{}" alt="Aave logo">"#, escape_html(logo)),
        _ => String::new(),
    };
    let rank = entry.rank.map(|rank| rank.to_string()).unwrap_or_default();

    format!(
        "<tr{class}><td>{rank}</td><td><div class=\"name\">{logo}<span>{}</span></div></td><td class=\"deposits\">{}</td></tr>\n",
        escape_html(&entry.name),
        escape_html(&entry.deposits),
    )
}

/// Link back to the page with a cache-busting token.
fn refresh_href(now: DateTime<Utc>) -> String {
    format!("/?t={}", now.timestamp_millis())
}

/// `HH:MM:SS UTC`, or the raw value if it is not RFC 3339.
fn display_time(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|time| time.with_timezone(&Utc).format("%H:%M:%S UTC").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use aavebanks::rank_entries;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 45, 0).unwrap()
    }

    fn bank(name: &str, value: f64) -> Entry {
        Entry {
            name: name.to_string(),
            deposits: format!("${value:.1} B"),
            deposits_value: value,
            is_aave: false,
            rank: None,
            logo: None,
            assets: None,
        }
    }

    fn dashboard(bank_count: usize, aave: f64) -> Dashboard {
        let banks = (0..bank_count)
            .map(|i| bank(&format!("BANK {i}/HOLDING & CO"), 1000.0 - i as f64 * 10.0))
            .collect();
        Dashboard {
            ranking: rank_entries(banks, Entry::protocol("Aave", "https://img.test/aave.png", aave)),
            source: "https://www.federalreserve.gov/releases/lbr/current/".to_string(),
            last_updated: "2024-06-30T12:34:56.000Z".to_string(),
        }
    }

    #[test]
    fn page_highlights_aave_and_windows_rows() {
        // 40 banks at 1000, 990, ... 610; Aave at 805 lands at rank 21.
        let html = render_dashboard_page(&dashboard(40, 805.0), DisplayWindow::default(), now());

        assert!(html.contains("Aave ranks #21 among U.S. banks by deposit size."));
        assert!(html.contains(r#"<tr class="aave"><td>21</td>"#));
        assert!(html.contains(r#"<img src="https://img.test/aave.png" alt="Aave logo">"#));
        assert!(html.contains("<td>16</td>"));
        assert!(html.contains("<td>26</td>"));
        assert!(!html.contains("<td>15</td>"));
        assert!(!html.contains("<td>27</td>"));
        assert!(html.contains("Showing 11 of 41 entries."));
        assert!(html.contains("Last updated: 12:34:56 UTC"));
        assert!(html.contains(r#"href="/?t=1719751500000""#));
    }

    #[test]
    fn names_are_escaped() {
        let html = render_dashboard_page(&dashboard(2, 1.0), DisplayWindow::default(), now());
        assert!(html.contains("BANK 0/HOLDING &amp; CO"));
        assert!(!html.contains("HOLDING & CO"));
    }

    #[test]
    fn short_tables_are_shown_in_full() {
        let html = render_dashboard_page(&dashboard(3, 1.0), DisplayWindow::default(), now());
        assert!(html.contains("Showing 4 of 4 entries."));
        assert!(html.contains(r#"<tr class="aave"><td>4</td>"#));
    }

    #[test]
    fn error_page_offers_retry() {
        let html = render_error_page("Failed to fetch <dashboard> data", now());
        assert!(html.contains("Error: Failed to fetch &lt;dashboard&gt; data"));
        assert!(html.contains(r#"<a class="retry" href="/?t=1719751500000">"#));
        assert!(html.contains("Try Again"));
    }

    #[test]
    fn display_time_falls_back_to_raw_value() {
        assert_eq!(display_time("yesterday"), "yesterday");
    }
}
