// Shared by the bench targets in this directory; each uses a subset.
#[allow(dead_code)]
pub fn generate_note(size: usize) -> String {
    let base = "# Groceries\n\nPick up **oat milk** and _fresh_ bread from [the market](https://example.com).\n\n- [x] Buy milk\n- [ ] Call the *bakery*\n  * nested with `code`\n3. Step three\n\n> Remember: __always__ check the `receipt`\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_list(items: usize) -> String {
    let mut content = String::new();
    for i in 1..=items {
        content.push_str(&format!("{i}. item number {i} with *some* text\n"));
    }
    content
}

/// One numbered item per line, each carrying italic, bold and code spans.
#[allow(dead_code)]
pub fn generate_styled_list(lines: usize) -> String {
    (1..=lines)
        .map(|i| format!("{i}. item *some* **b** `c`\n"))
        .collect()
}
