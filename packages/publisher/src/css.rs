//! Theme tokens → global stylesheet.
//!
//! Tokens are emitted as a flat `:root` custom-property block, one
//! declaration per token, grouped and prefixed by token family. The
//! token maps are BTreeMaps, so output order is stable.

use pageforge_document::Theme;

/// Compile theme tokens to a CSS custom-property declaration block.
pub fn compile_theme_css(theme: &Theme) -> String {
    let mut out = String::from(":root {\n");
    for (name, value) in &theme.colors {
        out.push_str(&format!("  --color-{}: {};\n", name, value));
    }
    for (name, value) in &theme.typography {
        out.push_str(&format!("  --font-{}: {};\n", name, value));
    }
    for (name, value) in &theme.scale {
        out.push_str(&format!("  --scale-{}: {};\n", name, value));
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_theme() {
        let css = compile_theme_css(&Theme::default());
        assert_eq!(css, ":root {\n}\n");
    }

    #[test]
    fn test_token_families_are_prefixed() {
        let mut theme = Theme::default();
        theme.colors.insert("primary".into(), "#3366ff".into());
        theme
            .typography
            .insert("body".into(), "16px/1.6 sans-serif".into());
        theme.scale.insert("md".into(), "16px".into());

        let css = compile_theme_css(&theme);
        assert!(css.contains("--color-primary: #3366ff;"));
        assert!(css.contains("--font-body: 16px/1.6 sans-serif;"));
        assert!(css.contains("--scale-md: 16px;"));
    }

    #[test]
    fn test_output_order_is_stable() {
        let mut theme = Theme::default();
        theme.colors.insert("zebra".into(), "#000".into());
        theme.colors.insert("accent".into(), "#fff".into());

        let css = compile_theme_css(&theme);
        let accent = css.find("--color-accent").unwrap();
        let zebra = css.find("--color-zebra").unwrap();
        assert!(accent < zebra);
    }
}
