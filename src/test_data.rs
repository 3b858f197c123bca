#![cfg(test)]

pub const POST_DATA: &str = r#"+++
title = "Why I like Rust"
date = "2024-03-01"
slug = "why-i-like-rust"
excerpt = "Ownership is a feature, not a tax."
categories = ["Systems", "Rust"]
tags = ["rust", "memory-safety"]
published = true
+++
Rust makes systems programming feel safe without making it feel slow.

The borrow checker is a strict reviewer that never gets tired. Once you stop
fighting it, most of your concurrency bugs disappear before the program runs.
"#;

pub const POST_NO_AUTHOR_NO_TAGS: &str = r#"+++
title = "Small notes"
date = "2024-02-01"
slug = "small-notes"
excerpt = "Assorted notes."
categories = ["Notes"]
published = true
+++
A few things I want to remember.
"#;

pub const POST_UNPUBLISHED: &str = r#"+++
title = "Draft thoughts"
date = "2024-01-15"
slug = "draft-thoughts"
excerpt = "Not ready yet."
categories = ["Notes"]
+++
Still chewing on this one.
"#;

pub const POST_BROKEN_TITLE: &str = r#"+++
title = ""
date = "2024-01-01"
slug = "broken"
excerpt = "This one will not load."
+++
Body of a post that fails validation.
"#;
