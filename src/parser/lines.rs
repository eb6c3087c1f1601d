/// Split editor text into lines the way the editor numbers them: on `\n`
/// only, so a trailing newline yields a trailing empty line.
pub fn split_source(text: &str) -> Vec<String> {
    text.split('\n').map(|l| l.trim_end_matches('\r').to_string()).collect()
}
