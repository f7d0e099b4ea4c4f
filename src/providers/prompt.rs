/// The instruction template sent to the generative backend for a search.
///
/// The template is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
///
/// Contains a `{{QUERY}}` placeholder that [`build_search_prompt`] replaces
/// with the user's search.
pub const RECIPE_SEARCH_PROMPT: &str = include_str!("prompt.txt");

/// System prompt accompanying every search.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that outputs strictly JSON.";

/// Build the user prompt for a search query.
pub fn build_search_prompt(query: &str) -> String {
    RECIPE_SEARCH_PROMPT.replace("{{QUERY}}", query.trim())
}
