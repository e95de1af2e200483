//! Built-in panel templates.
//!
//! Template names end in `.html`, so minijinja HTML-escapes every
//! interpolated value. Pre-rendered fragments are passed through `|safe`.

use codebridge_core::{CodebridgeError, Result};
use minijinja::Environment;
use once_cell::sync::Lazy;
use serde::Serialize;

pub const CONSOLE_PLACEHOLDER: &str = "console/placeholder.html";
pub const CONSOLE_RUNNING: &str = "console/running.html";
pub const CONSOLE_OUTPUT: &str = "console/output.html";
pub const CONSOLE_FAILURE: &str = "console/failure.html";

pub const EDITOR: &str = "editor/textarea.html";

pub const REAL_WORLD_CONTENT: &str = "realworld/content.html";
pub const REAL_WORLD_LOADING: &str = "realworld/loading.html";
pub const REAL_WORLD_ERROR: &str = "realworld/error.html";

pub const DEMO_LOADING: &str = "demo/loading.html";
pub const DEMO_EMPTY: &str = "demo/empty.html";
pub const DEMO_MARKUP: &str = "demo/markup.html";
pub const DEMO_SPEC: &str = "demo/spec.html";
pub const DEMO_FALLBACK: &str = "demo/fallback.html";

pub const CHAT_TRANSCRIPT: &str = "chat/transcript.html";

pub const PRACTICE_LIST: &str = "practice/list.html";
pub const PRACTICE_PROBLEM: &str = "practice/problem.html";
pub const PRACTICE_OUTPUT: &str = "practice/output.html";
pub const PRACTICE_STATUS: &str = "practice/status.html";

pub const CONCEPT_POPUP: &str = "concept/popup.html";

pub const COMPLEXITY_LOADING: &str = "complexity/loading.html";
pub const COMPLEXITY_ERROR: &str = "complexity/error.html";
pub const COMPLEXITY_REPORT: &str = "complexity/report.html";

pub const AUTH_LOGGED_IN: &str = "auth/logged_in.html";
pub const AUTH_LOGGED_OUT: &str = "auth/logged_out.html";
pub const API_STATUS: &str = "status/api.html";

pub const VISUAL_LOGIN: &str = "visual/login.html";
pub const VISUAL_VEHICLE: &str = "visual/vehicle.html";
pub const VISUAL_DECORATOR: &str = "visual/decorator.html";
pub const VISUAL_TEMPERATURE: &str = "visual/temperature.html";
pub const VISUAL_PLACEHOLDER: &str = "visual/placeholder.html";
pub const VISUAL_ERROR: &str = "visual/error.html";

const SOURCES: &[(&str, &str)] = &[
    (
        CONSOLE_PLACEHOLDER,
        "// Console output will appear here after running your code",
    ),
    (
        CONSOLE_RUNNING,
        r#"<div class="loading-indicator"></div> Running code..."#,
    ),
    (
        CONSOLE_OUTPUT,
        concat!(
            r#"{% if success %}{% if output %}<pre class="console-text">{{ output|safe }}</pre>"#,
            r#"{% else %}<div class="output-empty">No output</div>{% endif %}"#,
            r#"{% else %}{% if error %}<pre class="console-text error-output">{{ error|safe }}</pre>"#,
            r#"{% else %}<div class="error-message">An unknown error occurred</div>{% endif %}{% endif %}"#,
            r#"{% if verdict %}<div class="success">{{ verdict }}</div>{% endif %}"#,
        ),
    ),
    (
        CONSOLE_FAILURE,
        r#"<div class="error-message">Error: {{ message }}</div>"#,
    ),
    (
        EDITOR,
        r#"<textarea id="simple-code-editor">{{ code }}</textarea>"#,
    ),
    (
        REAL_WORLD_CONTENT,
        concat!(
            r#"<div class="realworld-code">"#,
            r#"<h3 class="realworld-title">{{ title }}</h3>"#,
            r#"<p class="realworld-description">{{ description }}</p>"#,
            r#"<div class="realworld-code-block"><pre><code class="language-{{ language }}">{{ code }}</code></pre></div>"#,
            r#"{% if demo_button %}<button id="open-gui-demo" class="primary-button">Open GUI Demo</button>{% endif %}"#,
            r#"</div>"#,
        ),
    ),
    (
        REAL_WORLD_LOADING,
        concat!(
            r#"<div class="realworld-code">"#,
            r#"<h3 class="realworld-title">Analyzing your code...</h3>"#,
            r#"<div class="loading-state"><div class="loading-indicator"></div>"#,
            r#"<p>Generating real-world application examples...</p></div>"#,
            r#"</div>"#,
        ),
    ),
    (
        REAL_WORLD_ERROR,
        concat!(
            r#"<div class="realworld-code">"#,
            r#"<h3 class="realworld-title">Error Loading Example</h3>"#,
            r#"<p class="realworld-description error-message">An error occurred while generating the example: {{ message }}</p>"#,
            r#"</div>"#,
        ),
    ),
    (
        DEMO_LOADING,
        concat!(
            r#"<div class="loading-spinner-container"><div class="loading-spinner"></div>"#,
            r#"<p>Generating interactive GUI demonstration...</p></div>"#,
        ),
    ),
    (DEMO_EMPTY, r#"<div class="empty-state">{{ message }}</div>"#),
    (
        DEMO_MARKUP,
        r#"<div class="interactive-demo">{{ body|safe }}</div>"#,
    ),
    (
        DEMO_SPEC,
        concat!(
            r#"<div class="interactive-demo demo-spec">"#,
            r#"<div class="demo-header"><h3>{{ title }}</h3>{% if description %}<p>{{ description }}</p>{% endif %}</div>"#,
            r#"<form class="demo-form">"#,
            r#"{% for w in widgets %}<div class="demo-field">"#,
            r#"{% if w.kind == "button" %}<button type="button" class="demo-button" data-id="{{ w.id }}">{{ w.label }}</button>"#,
            r#"{% elif w.kind == "select" %}<label for="{{ w.id }}">{{ w.label }}</label><select id="{{ w.id }}">"#,
            r#"{% for o in w.options %}<option value="{{ o.value }}"{% if o.selected %} selected{% endif %}>{{ o.label }}</option>{% endfor %}</select>"#,
            r#"{% else %}<label for="{{ w.id }}">{{ w.label }}</label>"#,
            r#"<input id="{{ w.id }}" type="{{ w.input_type }}" value="{{ w.value }}"{% if w.placeholder %} placeholder="{{ w.placeholder }}"{% endif %}>"#,
            r#"{% if w.strength %}<div class="strength-meter">{{ w.strength }}</div>{% endif %}"#,
            r#"{% endif %}</div>{% endfor %}"#,
            r#"</form>"#,
            r#"<div class="demo-result result-{{ tone }}">{% for line in lines %}<p>{{ line }}</p>{% endfor %}</div>"#,
            r#"</div>"#,
        ),
    ),
    (
        DEMO_FALLBACK,
        concat!(
            r#"<div class="error-message">Could not load GUI demo. Showing a built-in demo instead.</div>"#,
            r#"<p class="error-details">{{ message }}</p>"#,
            r#"{{ body|safe }}"#,
        ),
    ),
    (
        CHAT_TRANSCRIPT,
        concat!(
            r#"{% for m in messages %}<div class="message message-{{ m.role }}">"#,
            r#"<div class="message-bubble">{{ m.html|safe }}</div>"#,
            r#"<div class="message-time">{{ m.time }}</div></div>{% endfor %}"#,
            r#"{% if thinking %}<div class="message message-ai thinking"><div class="message-bubble">"#,
            r#"<div class="thinking-indicator"><span></span><span></span><span></span></div>"#,
            r#"</div></div>{% endif %}"#,
        ),
    ),
    (
        PRACTICE_LIST,
        concat!(
            r#"{% for p in problems %}<div class="practice-problem-item" data-id="{{ loop.index0 }}">"#,
            r#"<div class="practice-problem-title">{{ p.title }}</div>"#,
            r#"<div class="practice-problem-description">{{ p.summary }}</div>"#,
            r#"<div class="practice-problem-difficulty difficulty-{{ p.difficulty_class }}">{{ p.difficulty }}</div>"#,
            r#"</div>{% endfor %}"#,
        ),
    ),
    (
        PRACTICE_PROBLEM,
        concat!(
            r#"<h3>{{ title }}</h3><p>{{ description }}</p>"#,
            r#"{% if hints %}<div class="practice-hints"><h4>Hints:</h4><ul>"#,
            r#"{% for h in hints %}<li>{{ h }}</li>{% endfor %}</ul></div>{% endif %}"#,
        ),
    ),
    (
        PRACTICE_OUTPUT,
        concat!(
            r#"{% if lines %}<pre class="formatted-output">"#,
            "{% for line in lines %}<span class=\"line-number\">{{ loop.index }}</span> {{ line }}\n{% endfor %}",
            r#"</pre>{% else %}<div class="output-empty">No output</div>{% endif %}"#,
            r#"{% if verdict %}<div class="success">{{ verdict }}</div>{% endif %}"#,
        ),
    ),
    (
        PRACTICE_STATUS,
        r#"<div class="{{ class }}">{% if spinner %}<div class="loading-indicator"></div> {% endif %}{{ message }}</div>"#,
    ),
    (
        CONCEPT_POPUP,
        concat!(
            r#"<div class="popup-content"><div class="popup-header"><h2>Learning Path: {{ name }}</h2>"#,
            r#"<button class="popup-close">&times;</button></div>"#,
            r#"<div class="popup-body"><div class="ai-learning-path">"#,
            r#"{% if state == "loading" %}<div class="thinking-indicator"><span></span><span></span><span></span></div>"#,
            r#"<p>AI assistant is analyzing this concept...</p>"#,
            r#"{% elif state == "error" %}<div class="error-message"><h3>Error Loading Examples</h3>"#,
            r#"<p>Sorry, we couldn't load examples for this concept. Please try again later.</p>"#,
            r#"<p class="error-details">{{ message }}</p>"#,
            r#"<div class="error-actions"><button class="primary-button retry-btn">Retry</button>"#,
            r#"<button class="secondary-button fallback-btn">Use Offline Examples</button></div></div>"#,
            r#"{% else %}<h3>{{ title }}</h3><div class="concept-description"><p>{{ description }}</p>"#,
            r#"<h4>Real-World Applications</h4><p>{{ real_world }}</p>"#,
            r#"<h4>Example</h4><div class="code-snippet"><pre><code class="language-python">{{ example }}</code></pre></div>"#,
            r#"</div>{% endif %}"#,
            r#"</div></div></div>"#,
        ),
    ),
    (
        COMPLEXITY_LOADING,
        concat!(
            r#"<div class="analysis-loading"><div class="loading-spinner"></div>"#,
            r#"<p>Analyzing code complexity, please wait...</p></div>"#,
        ),
    ),
    (
        COMPLEXITY_ERROR,
        concat!(
            r#"<div class="analysis-error"><div class="error-icon">❌</div>"#,
            r#"<h3>Error Analyzing Code</h3>"#,
            r#"<p>Sorry, we couldn't analyze your code. Please try again later.</p>"#,
            r#"{% if message %}<div class="error-details">{{ message }}</div>{% endif %}"#,
            r#"</div>"#,
        ),
    ),
    (
        COMPLEXITY_REPORT,
        concat!(
            r#"<div class="complexity-summary"><div class="complexity-score-container">"#,
            r#"<div class="score-circle {{ color_class }}"><div class="score-number">{{ score }}</div>"#,
            r#"<div class="score-label">complexity</div></div>"#,
            r#"<div class="score-details"><h3>{{ label }}</h3>"#,
            r#"<div class="complexity-score-bar"><div class="complexity-score-fill {{ color_class }}" style="width: {{ bar_percent }}%"></div></div>"#,
            r#"<p class="complexity-score-description">This code is <span class="{{ color_class }}">{{ level_description }}</span></p>"#,
            r#"</div></div></div>"#,
            r#"<div class="complexity-tabs"><div class="tabs-header">"#,
            r#"{% for t in tabs %}<button class="tab-btn{% if t.active %} active{% endif %}" data-tab="{{ t.id }}">{{ t.title }}</button>{% endfor %}"#,
            r#"</div><div class="tabs-content">"#,
            r#"<div class="tab-pane{% if active_tab == "analysis" %} active{% endif %}" id="analysis-tab">"#,
            r#"<div class="complexity-explanation"><h3>Why This Code is {{ label }}</h3><p>{{ explanation }}</p>"#,
            r#"<h4>Complexity Factors</h4><ul class="factor-list">{% for f in factors %}<li>{{ f }}</li>{% endfor %}</ul></div>"#,
            r#"<div class="complexity-analogy"><h4>Real-World Comparison</h4><div class="analogy-box"><p>{{ comparison }}</p></div></div>"#,
            r#"</div>"#,
            r#"<div class="tab-pane{% if active_tab == "suggestions" %} active{% endif %}" id="suggestions-tab">"#,
            r#"<div class="complexity-suggestions"><h3>How to Simplify This Code</h3>"#,
            r#"<p>Try these techniques to reduce complexity and make your code more maintainable:</p>"#,
            r#"<ul class="suggestion-list">{% for s in suggestions %}<li><div class="suggestion-number">{{ loop.index }}</div>"#,
            r#"<div class="suggestion-content">{{ s }}</div></li>{% endfor %}</ul></div>"#,
            r#"</div>"#,
            r#"<div class="tab-pane{% if active_tab == "concepts" %} active{% endif %}" id="concepts-tab">"#,
            r#"<div class="complexity-concepts"><h3>Programming Concepts Used</h3>"#,
            r#"<p>This code demonstrates the following concepts:</p><div class="concept-grid">"#,
            r#"{% for c in concepts %}<div class="concept-card"><div class="concept-name">{{ c }}</div></div>"#,
            r#"{% else %}<p>No specific concepts detected.</p>{% endfor %}</div></div>"#,
            r#"</div>"#,
            r#"<div class="tab-pane{% if active_tab == "visual" %} active{% endif %}" id="visual-tab">"#,
            r#"<div class="complexity-visualization"><h3>Visual Complexity Breakdown</h3>"#,
            r#"<svg class="complexity-chart" xmlns="http://www.w3.org/2000/svg" width="400" height="250" viewBox="0 0 400 250">"#,
            r#"<text x="200" y="30" text-anchor="middle">Code Complexity Breakdown</text>"#,
            r#"{% for bar in bars %}<rect class="chart-track" x="{{ bar.x }}" y="40" width="80" height="180"></rect>"#,
            r#"<rect class="chart-bar legend-{{ bar.key }}" x="{{ bar.x }}" y="{{ bar.y }}" width="80" height="{{ bar.height }}"></rect>"#,
            r#"<text x="{{ bar.center }}" y="{{ bar.value_y }}" text-anchor="middle">{{ bar.value }}</text>"#,
            r#"<text x="{{ bar.center }}" y="240" text-anchor="middle">{{ bar.label }}</text>{% endfor %}"#,
            r#"</svg>"#,
            r#"<p class="visualization-note">Sub-scores are approximations derived from the overall score.</p>"#,
            r#"</div></div>"#,
            r#"</div></div>"#,
        ),
    ),
    (
        AUTH_LOGGED_IN,
        concat!(
            r#"<div class="user-info"><span class="username">{{ username }}</span>"#,
            r#"<a class="btn-auth btn-logout" id="logout-btn" href="{{ logout_url }}">Log Out</a></div>"#,
        ),
    ),
    (
        AUTH_LOGGED_OUT,
        r#"<a class="btn-auth" id="sign-in-btn" href="{{ login_url }}">Sign In</a>"#,
    ),
    (
        API_STATUS,
        concat!(
            r#"<div class="status-indicator status-{{ state }}"></div>"#,
            r#"<span class="status-text">{{ text }}</span>"#,
            r#"{% if details %}<p class="status-details">{{ details }}</p>{% endif %}"#,
        ),
    ),
    (
        VISUAL_LOGIN,
        concat!(
            r#"<div class="login-visualization"><div class="login-container{% if class %} {{ class }}{% endif %}">"#,
            r#"<div class="login-status">{{ status }}</div><div class="login-message">{{ message }}</div>"#,
            r#"</div></div>"#,
        ),
    ),
    (
        VISUAL_VEHICLE,
        concat!(
            r#"<div class="vehicle-visualization"><div class="vehicle-container">"#,
            r#"<div class="vehicle-info">{{ info }}</div>"#,
            r#"{% if driving %}<div class="motion-lines"></div>{% endif %}"#,
            r#"<div class="vehicle-status-container">"#,
            r#"<div class="vehicle-status {% if engine_on %}status-on{% else %}status-off{% endif %}">Engine: {% if engine_on %}Running{% else %}Off{% endif %}</div>"#,
            r#"<div class="vehicle-status{% if driving %} status-driving{% endif %}">Status: {% if driving %}Driving{% else %}Parked{% endif %}</div>"#,
            r#"</div></div></div>"#,
        ),
    ),
    (
        VISUAL_DECORATOR,
        concat!(
            r#"<div class="decorator-visualization"><div class="decorator-container">"#,
            r#"<div class="decorator-header"><h3>Function Execution Flow</h3></div>"#,
            r#"<div class="execution-flow">"#,
            r#"<div class="flow-step"><div class="step-number">1</div><div class="step-description">Call to <span class="code-name">{{ function }}()</span></div></div>"#,
            r#"<div class="flow-arrow">↓</div>"#,
            r#"<div class="flow-step decorator-step"><div class="step-number">2</div><div class="step-description">@timer_decorator intercepts call</div></div>"#,
            r#"<div class="flow-arrow">↓</div>"#,
            r#"<div class="flow-step"><div class="step-number">3</div><div class="step-description">Original function executes</div></div>"#,
            r#"<div class="flow-arrow">↓</div>"#,
            r#"<div class="flow-step result-step"><div class="step-number">4</div><div class="step-description">Result: {{ result }}</div></div>"#,
            r#"</div>"#,
            r#"{% if time %}<div class="execution-time"><div class="time-value">Execution Time: {{ time }}</div></div>{% endif %}"#,
            r#"</div></div>"#,
        ),
    ),
    (
        VISUAL_TEMPERATURE,
        concat!(
            r#"<div class="temperature-visualization"><div class="temperature-container">"#,
            r#"<div class="temperature-header"><h3>Temperature Conversion</h3></div>"#,
            r#"<div class="conversion-results">"#,
            r#"{% for c in conversions %}<div class="conversion-result"><div class="temp-value">{{ c.from }}</div>"#,
            r#"<div class="conversion-arrow">→</div><div class="temp-value result-value">{{ c.to }}</div></div>"#,
            r#"{% else %}<div class="conversion-placeholder">Run temperature conversion code to see results</div>{% endfor %}"#,
            r#"</div></div></div>"#,
        ),
    ),
    (
        VISUAL_PLACEHOLDER,
        r#"<div class="placeholder-text">{{ message }}</div>"#,
    ),
    (
        VISUAL_ERROR,
        concat!(
            r#"<div class="error-container"><div class="error-title">Execution Error</div>"#,
            r#"<div class="error-message">{{ message }}</div></div>"#,
        ),
    ),
];

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    for (name, source) in SOURCES {
        env.add_template(name, source)
            .expect("built-in template is valid");
    }
    env
});

/// Renders a built-in template.
pub fn render<S: Serialize>(name: &str, context: S) -> Result<String> {
    TEMPLATES
        .get_template(name)
        .and_then(|template| template.render(context))
        .map_err(|err| CodebridgeError::internal(format!("Template '{name}' failed: {err}")))
}
