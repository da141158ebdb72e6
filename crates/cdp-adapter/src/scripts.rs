//! Page-side scripts.
//!
//! Every script is a self-invoking expression returning a plain object with a
//! `status` of `ok`, `missing` or `denied`, so the caller can map the outcome
//! without relying on thrown exceptions.

use action_primitives::ActionError;

fn literal(value: &str) -> Result<String, ActionError> {
    serde_json::to_string(value)
        .map_err(|err| ActionError::Internal(format!("invalid literal encoding: {}", err)))
}

pub fn count(selector: &str) -> Result<String, ActionError> {
    Ok(format!(
        "(() => ({{ status: 'ok', count: document.querySelectorAll({sel}).length }}))()",
        sel = literal(selector)?,
    ))
}

pub fn text(selector: &str) -> Result<String, ActionError> {
    Ok(format!(
        "(() => {{
            const el = document.querySelector({sel});
            if (!el) {{ return {{ status: 'missing' }}; }}
            return {{ status: 'ok', value: (el.innerText || el.textContent || '') }};
        }})()",
        sel = literal(selector)?,
    ))
}

pub fn attribute(selector: &str, name: &str) -> Result<String, ActionError> {
    Ok(format!(
        "(() => {{
            const el = document.querySelector({sel});
            if (!el) {{ return {{ status: 'missing' }}; }}
            return {{ status: 'ok', value: el.getAttribute({name}) }};
        }})()",
        sel = literal(selector)?,
        name = literal(name)?,
    ))
}

pub fn scroll_into_view(selector: &str) -> Result<String, ActionError> {
    Ok(format!(
        "(() => {{
            const el = document.querySelector({sel});
            if (!el) {{ return {{ status: 'missing' }}; }}
            el.scrollIntoView({{ block: 'center', inline: 'nearest' }});
            return {{ status: 'ok' }};
        }})()",
        sel = literal(selector)?,
    ))
}

pub fn focus(selector: &str) -> Result<String, ActionError> {
    Ok(format!(
        "(() => {{
            const el = document.querySelector({sel});
            if (!el) {{ return {{ status: 'missing' }}; }}
            el.focus();
            return {{ status: 'ok' }};
        }})()",
        sel = literal(selector)?,
    ))
}

/// Native-setter write. The value tracker some frameworks keep on inputs is
/// rewound to the previous value so the following `input` event registers as
/// a change.
pub fn inject_value(selector: &str, value: &str) -> Result<String, ActionError> {
    Ok(format!(
        "(() => {{
            const el = document.querySelector({sel});
            if (!el) {{ return {{ status: 'missing' }}; }}
            const proto = el instanceof HTMLTextAreaElement
                ? HTMLTextAreaElement.prototype
                : el instanceof HTMLSelectElement
                    ? HTMLSelectElement.prototype
                    : HTMLInputElement.prototype;
            const descriptor = Object.getOwnPropertyDescriptor(proto, 'value');
            const previous = el.value;
            if (descriptor && descriptor.set) {{
                descriptor.set.call(el, {value});
            }} else {{
                el.value = {value};
            }}
            const tracker = el._valueTracker;
            if (tracker && typeof tracker.setValue === 'function') {{
                tracker.setValue(previous);
            }}
            return {{ status: 'ok' }};
        }})()",
        sel = literal(selector)?,
        value = literal(value)?,
    ))
}

pub fn dispatch(selector: &str, event: &str) -> Result<String, ActionError> {
    Ok(format!(
        "(() => {{
            const el = document.querySelector({sel});
            if (!el) {{ return {{ status: 'missing' }}; }}
            el.dispatchEvent(new Event({event}, {{ bubbles: true }}));
            return {{ status: 'ok' }};
        }})()",
        sel = literal(selector)?,
        event = literal(event)?,
    ))
}

pub fn click(selector: &str, index: usize) -> Result<String, ActionError> {
    Ok(format!(
        "(() => {{
            const el = document.querySelectorAll({sel})[{index}];
            if (!el) {{ return {{ status: 'missing' }}; }}
            el.click();
            return {{ status: 'ok' }};
        }})()",
        sel = literal(selector)?,
        index = index,
    ))
}

pub fn labels(selector: &str) -> Result<String, ActionError> {
    Ok(format!(
        "(() => ({{
            status: 'ok',
            value: Array.from(document.querySelectorAll({sel})).map((el) =>
                ((el.getAttribute('aria-label') || el.innerText || '')).trim()
            ),
        }}))()",
        sel = literal(selector)?,
    ))
}

pub fn storage_get(key: &str) -> Result<String, ActionError> {
    Ok(format!(
        "(() => {{
            try {{
                return {{ status: 'ok', value: window.localStorage.getItem({key}) }};
            }} catch (err) {{
                return {{ status: 'denied', message: String(err) }};
            }}
        }})()",
        key = literal(key)?,
    ))
}

pub fn storage_set(key: &str, value: &str) -> Result<String, ActionError> {
    Ok(format!(
        "(() => {{
            try {{
                window.localStorage.setItem({key}, {value});
                return {{ status: 'ok' }};
            }} catch (err) {{
                return {{ status: 'denied', message: String(err) }};
            }}
        }})()",
        key = literal(key)?,
        value = literal(value)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_are_embedded_as_string_literals() {
        let script = text("input[name=\"given\"]").unwrap();
        assert!(script.contains(r#"document.querySelector("input[name=\"given\"]")"#));
    }

    #[test]
    fn injected_values_cannot_break_out_of_the_literal() {
        let script = inject_value("#x", "O'Brien\"); alert(1); (\"").unwrap();
        assert!(script.contains(r#""O'Brien\"); alert(1); (\"""#));
    }

    #[test]
    fn click_targets_the_requested_index() {
        let script = click(".suggestion", 1).unwrap();
        assert!(script.contains("(\".suggestion\")[1]"));
    }
}
