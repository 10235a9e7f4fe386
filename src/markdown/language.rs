//! Fence language inference from the first line of a code block.
//!
//! Rules are tried in order and the first match wins, so a Python
//! `import os` is tagged `java`. That ordering is kept as-is.

use regex::Regex;
use std::sync::LazyLock;

static YAML_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[a-z_]+:").expect("yaml key pattern"));

pub fn infer_language(next_line: Option<&str>) -> &'static str {
    let Some(line) = next_line else {
        return "text";
    };
    let trimmed = line.trim_start();

    if ["import", "public class", "package"]
        .iter()
        .any(|s| line.contains(s))
    {
        "java"
    } else if ["def ", "import ", "class "]
        .iter()
        .any(|s| trimmed.starts_with(s))
    {
        "python"
    } else if ["const ", "let ", "function", "import {"]
        .iter()
        .any(|s| line.contains(s))
    {
        "javascript"
    } else if ["#!/bin/bash", "echo ", "cd "]
        .iter()
        .any(|s| trimmed.starts_with(s))
    {
        "bash"
    } else if trimmed.starts_with('{') || trimmed.starts_with('[') {
        "json"
    } else if YAML_KEY.is_match(line) {
        "yaml"
    } else {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_language_rules() {
        let cases = [
            ("public class Main {", "java"),
            ("package com.example;", "java"),
            ("import os", "java"),
            ("def f(): pass", "python"),
            ("class Foo:", "python"),
            ("const x = 1;", "javascript"),
            ("function go() {}", "javascript"),
            ("#!/bin/bash", "bash"),
            ("echo hello", "bash"),
            ("cd /tmp", "bash"),
            ("  {\"a\": 1}", "json"),
            ("[1, 2]", "json"),
            ("name: docs", "yaml"),
            ("  nested_key: 1", "yaml"),
            ("Hello world", "text"),
            ("", "text"),
        ];
        for (line, expected) in cases {
            assert_eq!(infer_language(Some(line)), expected, "{line:?}");
        }
    }

    #[test]
    fn test_infer_language_at_end_of_document() {
        assert_eq!(infer_language(None), "text");
    }
}
