//! Embedded HTML/CSS/JS frontend for the aidesk dashboard.
//!
//! The entire single-page dashboard is compiled into the binary as a string
//! constant. No external assets, no build tools, no CDN dependencies. The
//! page's JS talks to the same tool endpoints the CLI dispatcher uses, with
//! form-encoded POST bodies.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>aidesk</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --red: #f85149;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

.app { max-width: 960px; margin: 0 auto; padding: 24px; }

header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}
header h1 { font-size: 22px; font-weight: 600; }
header h1 .logo { color: var(--accent); font-family: var(--mono); font-weight: 700; }
header .subtitle { color: var(--text-muted); font-size: 13px; }

.badge {
  display: inline-flex;
  align-items: center;
  gap: 4px;
  padding: 4px 10px;
  border-radius: 12px;
  font-size: 12px;
  background: var(--surface);
  border: 1px solid var(--border);
  color: var(--text-muted);
}
.badge.ok { border-color: var(--green); color: var(--green); }
.badge.err { border-color: var(--red); color: var(--red); }

nav {
  display: flex;
  flex-wrap: wrap;
  gap: 4px;
  margin-bottom: 24px;
  background: var(--surface);
  border-radius: var(--radius);
  padding: 4px;
  border: 1px solid var(--border);
}
nav button {
  flex: 1;
  padding: 8px 12px;
  border: none;
  border-radius: 6px;
  background: transparent;
  color: var(--text-muted);
  font-size: 13px;
  cursor: pointer;
}
nav button:hover { color: var(--text); background: rgba(255,255,255,0.04); }
nav button.active { color: var(--text); background: rgba(88,166,255,0.15); }

.tool-section { display: none; }
.tool-section.active { display: block; }

.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 16px;
  margin-bottom: 16px;
}
.card h2 { font-size: 15px; margin-bottom: 10px; }
.hint { color: var(--text-muted); font-size: 12px; margin-bottom: 10px; }

textarea, input, select {
  width: 100%;
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: 6px;
  color: var(--text);
  padding: 8px 10px;
  font-family: inherit;
  font-size: 13px;
  margin-bottom: 8px;
}
textarea { min-height: 110px; resize: vertical; }
.row { display: flex; gap: 8px; }
.row > * { flex: 1; }

button.go {
  background: var(--accent);
  border: none;
  border-radius: 6px;
  color: #0d1117;
  font-weight: 600;
  padding: 8px 16px;
  cursor: pointer;
}
button.go:hover { opacity: 0.9; }

.output {
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: 6px;
  padding: 10px;
  margin-top: 10px;
  min-height: 40px;
  white-space: pre-wrap;
  font-size: 13px;
}
.output:empty::before { content: "—"; color: var(--text-muted); }

.chat-window {
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: 6px;
  height: 320px;
  overflow-y: auto;
  padding: 10px;
  margin-bottom: 8px;
}
.message {
  max-width: 80%;
  padding: 8px 12px;
  border-radius: 10px;
  margin-bottom: 8px;
  white-space: pre-wrap;
  font-size: 13px;
}
.user-msg { background: rgba(88,166,255,0.2); margin-left: auto; }
.ai-msg { background: rgba(255,255,255,0.06); margin-right: auto; }
</style>
</head>
<body>
<div class="app">
  <header>
    <h1><span class="logo">aidesk</span> <span class="subtitle">local multi-tool AI desk</span></h1>
    <span id="health_badge" class="badge">checking…</span>
  </header>

  <nav>
    <button data-section="chatbot" class="active" onclick="showSection('chatbot')">Chat</button>
    <button data-section="assistant" onclick="showSection('assistant')">Assistant</button>
    <button data-section="code" onclick="showSection('code')">Code</button>
    <button data-section="legal" onclick="showSection('legal')">Legal</button>
    <button data-section="summarize" onclick="showSection('summarize')">Summarize</button>
    <button data-section="news" onclick="showSection('news')">News</button>
    <button data-section="shop" onclick="showSection('shop')">Shop</button>
    <button data-section="medical" onclick="showSection('medical')">Medical</button>
  </nav>

  <section id="chatbot" class="tool-section active">
    <div class="card">
      <h2>Chat Bot</h2>
      <div id="chatbot_window" class="chat-window"></div>
      <div class="row">
        <input id="chatbot_input" placeholder="Say something…" onkeydown="handleEnter(event, 'chatbot')">
        <button class="go" onclick="handleChatBot()">Send</button>
      </div>
    </div>
  </section>

  <section id="assistant" class="tool-section">
    <div class="card">
      <h2>AI Assistant</h2>
      <div id="assistant_window" class="chat-window"></div>
      <div class="row">
        <input id="assistant_input" placeholder="What do you need done?" onkeydown="handleEnter(event, 'assistant')">
        <button class="go" onclick="handleAssistant()">Send</button>
      </div>
    </div>
  </section>

  <section id="code" class="tool-section">
    <div class="card">
      <h2>Code Assist</h2>
      <select id="code_mode">
        <option value="generator">Generate code</option>
        <option value="debugger">Debug code</option>
      </select>
      <textarea id="code_input" placeholder="Describe the task or paste the broken code"></textarea>
      <button class="go" onclick="handleCode()">Run</button>
      <div id="code_output" class="output"></div>
    </div>
  </section>

  <section id="legal" class="tool-section">
    <div class="card">
      <h2>Legal Analyzer</h2>
      <textarea id="legal_input" placeholder="Paste the legal text"></textarea>
      <button class="go" onclick="handleLegal()">Analyze</button>
      <div id="legal_output" class="output"></div>
    </div>
  </section>

  <section id="summarize" class="tool-section">
    <div class="card">
      <h2>Text Summarizer</h2>
      <textarea id="sum_input" placeholder="Paste the text to summarize"></textarea>
      <button class="go" onclick="handleSummarize()">Summarize</button>
      <div id="sum_output" class="output"></div>
    </div>
  </section>

  <section id="news" class="tool-section">
    <div class="card">
      <h2>News Digest</h2>
      <textarea id="news_input" placeholder="Paste the news text"></textarea>
      <button class="go" onclick="handleNews()">Digest</button>
      <div class="hint">Facts</div>
      <div id="news_facts" class="output"></div>
      <div class="hint">Summary</div>
      <div id="news_summary" class="output"></div>
    </div>
  </section>

  <section id="shop" class="tool-section">
    <div class="card">
      <h2>Shopping Advisor</h2>
      <input id="shop_query" placeholder="What are you shopping for?">
      <div class="row">
        <input id="shop_min" placeholder="Min price" value="0">
        <input id="shop_max" placeholder="Max price" value="1000">
        <input id="shop_rating" placeholder="Min rating" value="4">
      </div>
      <button class="go" onclick="handleShop()">Recommend</button>
      <div id="shop_output" class="output"></div>
    </div>
  </section>

  <section id="medical" class="tool-section">
    <div class="card">
      <h2>Symptom Lookup</h2>
      <div class="hint">Informational only — not medical advice.</div>
      <textarea id="med_input" placeholder="Describe the symptoms"></textarea>
      <button class="go" onclick="handleMedical()">Look up</button>
      <div id="med_output" class="output"></div>
    </div>
  </section>
</div>

<script>
// Navigation
function showSection(id) {
  document.querySelectorAll('.tool-section').forEach(sec => sec.classList.remove('active'));
  document.getElementById(id).classList.add('active');
  document.querySelectorAll('nav button').forEach(btn =>
    btn.classList.toggle('active', btn.dataset.section === id));
}

// Generic exchange: form-encoded POST, JSON reply, alert on failure.
async function callApi(endpoint, fields) {
  const body = new URLSearchParams();
  for (const [name, value] of Object.entries(fields)) body.append(name, value);
  try {
    const response = await fetch(endpoint, { method: 'POST', body });
    if (!response.ok) throw new Error('request failed (' + response.status + ')');
    return await response.json();
  } catch (error) {
    alert('Error: ' + error.message);
    return null;
  }
}

// Chat helpers
function appendMessage(windowId, text, isUser) {
  const windowDiv = document.getElementById(windowId);
  const msgDiv = document.createElement('div');
  msgDiv.classList.add('message', isUser ? 'user-msg' : 'ai-msg');
  msgDiv.innerText = text;
  windowDiv.appendChild(msgDiv);
  windowDiv.scrollTop = windowDiv.scrollHeight;
}

function handleEnter(event, which) {
  if (event.key !== 'Enter') return;
  if (which === 'chatbot') handleChatBot();
  if (which === 'assistant') handleAssistant();
}

async function handleChatBot() {
  const input = document.getElementById('chatbot_input');
  const text = input.value;
  if (!text) return;

  appendMessage('chatbot_window', text, true);
  input.value = '';

  const data = await callApi('/api/chatbot', { message: text });
  if (data) appendMessage('chatbot_window', data.result, false);
}

async function handleAssistant() {
  const input = document.getElementById('assistant_input');
  const text = input.value;
  if (!text) return;

  appendMessage('assistant_window', text, true);
  input.value = '';

  const data = await callApi('/api/ai-assistant', { message: text });
  if (data) appendMessage('assistant_window', data.result, false);
}

// One-shot tools
async function handleCode() {
  const mode = document.getElementById('code_mode').value;
  const query = document.getElementById('code_input').value;
  const output = document.getElementById('code_output');

  output.innerText = 'Processing code...';
  const data = await callApi('/api/code-assist', { mode, query });
  if (data) output.innerText = data.result;
}

async function handleLegal() {
  const output = document.getElementById('legal_output');
  output.innerText = 'Analyzing document...';
  const data = await callApi('/api/legal-analyze', {
    text: document.getElementById('legal_input').value,
  });
  if (data) output.innerText = data.result;
}

async function handleSummarize() {
  const output = document.getElementById('sum_output');
  output.innerText = 'Summarizing...';
  const data = await callApi('/api/text-summarize', {
    text: document.getElementById('sum_input').value,
  });
  if (data) output.innerText = data.result;
}

async function handleNews() {
  document.getElementById('news_facts').innerText = 'Extracting...';
  document.getElementById('news_summary').innerText = 'Summarizing...';

  const data = await callApi('/api/news-summarize', {
    text: document.getElementById('news_input').value,
  });
  if (data) {
    document.getElementById('news_facts').innerText = data.facts;
    document.getElementById('news_summary').innerText = data.summary;
  }
}

async function handleShop() {
  const output = document.getElementById('shop_output');
  output.innerText = 'Finding recommendations...';
  const data = await callApi('/api/ecommerce', {
    query: document.getElementById('shop_query').value,
    price_min: document.getElementById('shop_min').value,
    price_max: document.getElementById('shop_max').value,
    rating: document.getElementById('shop_rating').value,
  });
  if (data) output.innerText = data.result;
}

async function handleMedical() {
  const output = document.getElementById('med_output');
  output.innerText = 'Consulting knowledge base...';
  const data = await callApi('/api/medical', {
    symptoms: document.getElementById('med_input').value,
  });
  if (data) output.innerText = data.result;
}

// Health badge
async function refreshHealth() {
  const badge = document.getElementById('health_badge');
  try {
    const resp = await fetch('/api/health');
    const health = await resp.json();
    if (health.ollama_available) {
      badge.className = 'badge ok';
      badge.innerText = health.model;
    } else {
      badge.className = 'badge err';
      badge.innerText = 'ollama down';
    }
  } catch (e) {
    badge.className = 'badge err';
    badge.innerText = 'offline';
  }
}
refreshHealth();
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontend_has_a_section_per_tool() {
        for id in [
            "chatbot",
            "assistant",
            "code",
            "legal",
            "summarize",
            "news",
            "shop",
            "medical",
        ] {
            assert!(
                INDEX_HTML.contains(&format!("id=\"{id}\"")),
                "missing section for {id}"
            );
        }
    }

    #[test]
    fn frontend_posts_to_the_documented_endpoints() {
        use crate::dispatch::Endpoint;
        for endpoint in [
            Endpoint::Chatbot,
            Endpoint::Assistant,
            Endpoint::CodeAssist,
            Endpoint::LegalAnalyze,
            Endpoint::TextSummarize,
            Endpoint::NewsSummarize,
            Endpoint::Ecommerce,
            Endpoint::Medical,
        ] {
            assert!(
                INDEX_HTML.contains(endpoint.path()),
                "frontend never calls {endpoint}"
            );
        }
    }
}
