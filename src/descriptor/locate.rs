//! Element lookup by rooted path and child-text predicate
//!
//! Paths are plain child-name chains from the root, such as
//! `web-app/env-entry`. The optional predicate matches on a named child
//! element's exact text content, because entry keys (`env-entry-name`,
//! `param-name`) are whitespace- and case-sensitive identifiers.

use crate::xml::model::Element;

/// First element matching the path, in document order
pub fn find_first<'a>(root: &'a Element, path: &str) -> Option<&'a Element> {
    find_first_matching(root, path, &|_| true)
}

/// First element matching the path whose named child has exactly the
/// given text content
pub fn find_first_where<'a>(
    root: &'a Element,
    path: &str,
    child_name: &str,
    child_text: &str,
) -> Option<&'a Element> {
    find_first_matching(root, path, &|el| {
        el.child_text(child_name).as_deref() == Some(child_text)
    })
}

fn find_first_matching<'a>(
    root: &'a Element,
    path: &str,
    predicate: &dyn Fn(&Element) -> bool,
) -> Option<&'a Element> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    if segments.next() != Some(root.name.as_str()) {
        return None;
    }
    let rest: Vec<&str> = segments.collect();
    descend(root, &rest, predicate)
}

fn descend<'a>(
    element: &'a Element,
    segments: &[&str],
    predicate: &dyn Fn(&Element) -> bool,
) -> Option<&'a Element> {
    let Some((head, tail)) = segments.split_first() else {
        return predicate(element).then_some(element);
    };
    element
        .child_elements()
        .filter(|el| el.name == *head)
        .find_map(|el| descend(el, tail, predicate))
}

/// Index of the root child entry with the given tag name whose key
/// child has exactly the given text
pub fn entry_index(root: &Element, name: &str, key_child: &str, key_text: &str) -> Option<usize> {
    root.children.iter().position(|node| {
        node.as_element().is_some_and(|el| {
            el.name == name && el.child_text(key_child).as_deref() == Some(key_text)
        })
    })
}

/// Index of the last direct child element with the given tag name
pub fn last_child_index(root: &Element, name: &str) -> Option<usize> {
    root.children
        .iter()
        .rposition(|node| node.as_element().is_some_and(|el| el.name == name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parser::Parser;

    fn fixture() -> Element {
        let input = concat!(
            "<web-app>\n",
            "    <context-param><param-name>a</param-name></context-param>\n",
            "    <error-page><error-code>404</error-code></error-page>\n",
            "    <error-page><error-code>500</error-code></error-page>\n",
            "    <env-entry><env-entry-name>mailHost</env-entry-name></env-entry>\n",
            "</web-app>",
        );
        Parser::new(input.as_bytes())
            .parse()
            .map(|doc| doc.root)
            .unwrap_or_else(|e| panic!("fixture parse failed: {e}"))
    }

    #[test]
    fn test_find_first() {
        let root = fixture();
        let found = find_first(&root, "web-app/error-page/error-code");
        assert_eq!(found.map(Element::text_content), Some("404".into()));
        assert!(find_first(&root, "web-app/servlet").is_none());
        assert!(find_first(&root, "other-root/servlet").is_none());
    }

    #[test]
    fn test_find_first_where() {
        let root = fixture();
        let found = find_first_where(&root, "web-app/env-entry", "env-entry-name", "mailHost");
        assert!(found.is_some());
        let missing = find_first_where(&root, "web-app/env-entry", "env-entry-name", "mailhost");
        assert!(missing.is_none(), "key match must be case-sensitive");
    }

    #[test]
    fn test_entry_index() {
        let root = fixture();
        let idx = entry_index(&root, "env-entry", "env-entry-name", "mailHost");
        assert!(idx.is_some());
        assert!(entry_index(&root, "env-entry", "env-entry-name", "other").is_none());
    }

    #[test]
    fn test_last_child_index() {
        let root = fixture();
        let last_error = last_child_index(&root, "error-page");
        let first_error = root
            .children
            .iter()
            .position(|n| n.as_element().is_some_and(|el| el.name == "error-page"));
        assert!(last_error > first_error);
        assert!(last_child_index(&root, "servlet").is_none());
    }
}
