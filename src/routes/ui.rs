use axum::{response::Html, routing::get, Router};

pub fn router() -> Router {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html(r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Can I Eat This?</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 0; background: #fdf6f9; color: #1d1d1f; }
    main { max-width: 640px; margin: 0 auto; padding: 2rem 1rem; }
    h1 { margin-bottom: 0.25rem; }
    .subtitle { color: #666; margin-top: 0; }
    form { display: flex; gap: 0.5rem; margin: 1.5rem 0; }
    input { flex: 1; padding: 0.6rem; font-size: 1rem; }
    button { padding: 0.6rem 1rem; cursor: pointer; }
    .suggestions button { margin: 0 0.4rem 0.4rem 0; }
    .card { background: #fff; border: 1px solid #ddd; border-left-width: 6px; padding: 1rem; border-radius: 8px; margin-bottom: 1rem; }
    .safe { border-left-color: #2e9d57; }
    .unsafe { border-left-color: #d33a3a; }
    .caution { border-left-color: #e6a11a; }
    .unknown { border-left-color: #888; }
    .snippet { background: #f6f8fa; padding: 0.75rem; font-style: italic; }
    .wiki img { float: left; max-width: 120px; margin: 0 1rem 0.5rem 0; }
    .disclaimer { color: #777; font-size: 0.8rem; margin-top: 2rem; }
  </style>
</head>
<body>
  <main>
    <h1>Can I Eat This?</h1>
    <p class="subtitle">Quick pregnancy food safety checker</p>

    <form id="searchForm">
      <input id="query" placeholder="e.g. sushi, brie, coffee" autocomplete="off" />
      <button type="submit">Check</button>
    </form>

    <div id="suggestions" class="suggestions"></div>
    <div id="results"></div>

    <p class="disclaimer">
      Disclaimer: This tool uses automated search results and may be inaccurate.
      It does not constitute medical advice. Always consult with your healthcare provider.
    </p>
  </main>

  <script>
    const LABELS = { safe: 'Likely Safe', unsafe: 'Not Safe', caution: 'Proceed with Caution', unknown: 'Unknown Status' };
    const results = document.getElementById('results');

    function el(tag, attrs, text) {
      const node = document.createElement(tag);
      Object.entries(attrs || {}).forEach(([k, v]) => node.setAttribute(k, v));
      if (text !== undefined) node.textContent = text;
      return node;
    }

    function renderSafety(query, safety) {
      const card = el('div', { class: 'card ' + (safety ? safety.status : 'unknown') });
      if (!safety) {
        card.append(el('h2', {}, 'No Analysis Available for "' + query + '"'));
        card.append(el('p', {}, "We couldn't determine the safety status automatically. Please check the detailed results below."));
        return card;
      }
      card.append(el('h2', {}, LABELS[safety.status]));
      card.append(el('p', {}, safety.summary));
      card.append(el('p', { class: 'snippet' }, '"' + safety.snippet + '"'));
      card.append(el('a', { href: safety.link, target: '_blank', rel: 'noopener noreferrer' }, 'Source: ' + safety.source));
      return card;
    }

    function renderWiki(data, fallbackLink) {
      const card = el('div', { class: 'card wiki' });
      card.append(el('h3', {}, 'General Information'));
      if (data.thumbnail) card.append(el('img', { src: data.thumbnail.source, alt: data.title }));
      card.append(el('h4', {}, data.title));
      card.append(el('p', {}, data.extract));
      card.append(el('a', { href: 'https://en.wikipedia.org/?curid=' + data.page_id, target: '_blank', rel: 'noopener noreferrer' }, 'Read on Wikipedia'));
      card.append(document.createTextNode(' | '));
      card.append(el('a', { href: fallbackLink, target: '_blank', rel: 'noopener noreferrer' }, 'Search on Google'));
      return card;
    }

    async function search(query) {
      query = query.trim();
      if (!query) return;
      document.getElementById('query').value = query;
      results.replaceChildren(el('p', {}, 'Analyzing search results...'));
      try {
        const response = await fetch('/api/lookup?q=' + encodeURIComponent(query));
        const data = await response.json();
        if (!response.ok) throw new Error(data.error || response.statusText);
        results.replaceChildren(renderSafety(data.query, data.safety));
        if (data.wiki) results.append(renderWiki(data.wiki, data.fallback_link));
        if (!data.safety && !data.wiki) {
          const card = el('div', { class: 'card unknown' });
          card.append(el('p', {}, "We couldn't find any information about \"" + data.query + '".'));
          card.append(el('a', { href: data.fallback_link, target: '_blank', rel: 'noopener noreferrer' }, 'Search Google Directly'));
          results.append(card);
        }
      } catch (err) {
        results.replaceChildren(el('p', {}, 'Error: ' + err.message));
      }
    }

    document.getElementById('searchForm').addEventListener('submit', (e) => {
      e.preventDefault();
      search(document.getElementById('query').value);
    });

    fetch('/api/suggestions').then(r => r.json()).then(items => {
      const box = document.getElementById('suggestions');
      items.forEach(item => {
        const button = el('button', { type: 'button' }, item);
        button.addEventListener('click', () => search(item));
        box.append(button);
      });
    });
  </script>
</body>
</html>
"#)
}
