use dioxus::document::eval;
use dioxus::prelude::spawn;
use services::speech::pick_voice;
use services::{SpeechRequest, SpeechSink, VoiceInfo};

/// Waits briefly for the engine to publish its voice list, then returns it.
const LIST_VOICES_SCRIPT: &str = r"
    const synth = window.speechSynthesis;
    if (!synth) { return []; }
    const read = () => synth.getVoices().map((v) => ({ name: v.name, lang: v.lang || '' }));
    let voices = read();
    if (voices.length === 0) {
        voices = await new Promise((resolve) => {
            const done = () => resolve(read());
            synth.addEventListener('voiceschanged', done, { once: true });
            setTimeout(done, 750);
        });
    }
    return voices;
";

/// Speech backed by the webview's `speechSynthesis` engine.
///
/// Requests are fire-and-forget; a missing engine or voice is logged and
/// otherwise ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSpeech;

impl SpeechSink for WebSpeech {
    fn speak(&self, request: SpeechRequest) {
        spawn(async move {
            let voices = eval(LIST_VOICES_SCRIPT)
                .join::<Vec<VoiceInfo>>()
                .await
                .unwrap_or_else(|err| {
                    log::warn!("speech voices unavailable: {err:?}");
                    Vec::new()
                });
            let voice = pick_voice(&voices, &request.language_prefix).map(|v| v.name.as_str());
            if voice.is_none() {
                log::debug!(
                    "no voice for {:?}, using engine default",
                    request.language_prefix
                );
            }
            let script = speak_script(&request, voice);
            if let Err(err) = eval(&script).await {
                log::warn!("speech failed: {err:?}");
            }
        });
    }
}

/// Cancel anything queued and speak `request` with `voice` when given.
pub(crate) fn speak_script(request: &SpeechRequest, voice: Option<&str>) -> String {
    let voice = voice.map_or_else(|| "null".to_owned(), js_string_literal);
    format!(
        r"(function() {{
            const synth = window.speechSynthesis;
            if (!synth) return;
            synth.cancel();
            const utterance = new SpeechSynthesisUtterance({text});
            const wanted = {voice};
            if (wanted !== null) {{
                const match = synth.getVoices().find((v) => v.name === wanted);
                if (match) {{
                    utterance.voice = match;
                    utterance.lang = match.lang;
                }}
            }} else {{
                utterance.lang = {lang};
            }}
            utterance.rate = {rate};
            synth.speak(utterance);
        }})();",
        text = js_string_literal(&request.text),
        lang = js_string_literal(&request.language_prefix),
        rate = request.rate,
    )
}

pub(crate) fn js_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::SpeechConfig;

    #[test]
    fn literal_escapes_quotes_and_breaks() {
        assert_eq!(js_string_literal(r#"Wie "geht's"?"#), r#""Wie \"geht's\"?""#);
        assert_eq!(js_string_literal("a\nb\\"), r#""a\nb\\""#);
    }

    #[test]
    fn speak_script_embeds_text_voice_and_rate() {
        let request = SpeechConfig::default().request("Guten Morgen");
        let script = speak_script(&request, Some("Anna"));
        assert!(script.contains(r#"new SpeechSynthesisUtterance("Guten Morgen")"#));
        assert!(script.contains(r#"const wanted = "Anna";"#));
        assert!(script.contains("utterance.rate = 0.95;"));
        assert!(script.contains("synth.cancel();"));
    }

    #[test]
    fn speak_script_falls_back_to_language() {
        let request = SpeechConfig::default().request("Danke");
        let script = speak_script(&request, None);
        assert!(script.contains("const wanted = null;"));
        assert!(script.contains(r#"utterance.lang = "de";"#));
    }
}
