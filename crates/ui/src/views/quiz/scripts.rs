pub(super) fn focus_script(element_id: &str) -> String {
    format!("document.getElementById({element_id:?})?.focus();")
}
