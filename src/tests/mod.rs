#[cfg(test)]
mod color_tests {
    use crate::color::*;

    #[test]
    fn test_reshade_identity() {
        // percent 1.0 must return the input unchanged
        assert_eq!(reshade("#cb4b16", 1.0), "#cb4b16");
        assert_eq!(reshade("#000000", 1.0), "#000000");
    }

    #[test]
    fn test_reshade_empty_input() {
        assert_eq!(reshade("", 0.5), "");
    }

    #[test]
    fn test_reshade_scales_channels() {
        assert_eq!(reshade("#808080", 0.5), "#404040");
        assert_eq!(reshade("#ffffff", 0.0), "#000000");
    }

    #[test]
    fn test_reshade_clamps() {
        assert_eq!(reshade("#ffffff", 2.0), "#ffffff");
    }

    #[test]
    fn test_to_rgb_parses_hex() {
        assert_eq!(to_rgb("#cb4b16"), (203, 75, 22));
        assert_eq!(to_rgb("cb4b16"), (203, 75, 22));
    }

    #[test]
    fn test_to_rgb_malformed_is_black() {
        assert_eq!(to_rgb("#zzzzzz"), (0, 0, 0));
        assert_eq!(to_rgb("nonsense"), (0, 0, 0));
        assert_eq!(to_rgb(""), (0, 0, 0));
    }

    #[test]
    fn test_from_rgb_round_trip() {
        assert_eq!(from_rgb(203, 75, 22), "#cb4b16");
        assert_eq!(to_rgb(&from_rgb(8, 8, 8)), (8, 8, 8));
    }

    #[test]
    fn test_palette_layout() {
        assert_eq!(PALETTE.len(), 256);
        assert_eq!(PALETTE[0], (0x00, 0x00, 0x00));
        assert_eq!(PALETTE[15], (0xff, 0xff, 0xff));
        // first cube entry duplicates black
        assert_eq!(PALETTE[16], (0x00, 0x00, 0x00));
        // last cube entry duplicates white
        assert_eq!(PALETTE[231], (0xff, 0xff, 0xff));
        // grayscale ramp
        assert_eq!(PALETTE[232], (8, 8, 8));
        assert_eq!(PALETTE[255], (238, 238, 238));
    }

    #[test]
    fn test_quantization_endpoints() {
        assert_eq!(rgb_to_index(0, 0, 0), 0);
        // white ties between 15 and 231; the lowest index wins
        assert_eq!(rgb_to_index(255, 255, 255), 15);
    }

    #[test]
    fn test_quantization_exact_cube_entry() {
        // cube coordinate (1, 2, 3) lives at 16 + 36 + 12 + 3
        assert_eq!(rgb_to_index(0x5f, 0x87, 0xaf), 67);
    }

    #[test]
    fn test_quantization_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(rgb_to_index(203, 75, 22), rgb_to_index(203, 75, 22));
        }
    }

    #[test]
    fn test_named_color_resolution() {
        assert_eq!(resolve_named("#ansired"), "#ff0000");
        assert_eq!(resolve_named("#ansiblack"), "#000000");
        // unknown names pass through
        assert_eq!(resolve_named("#fe348c"), "#fe348c");
        assert_eq!(color_index("#ansiblack"), 0);
    }
}

#[cfg(test)]
mod escape_tests {
    use crate::escape::{ColorMode, EscapeSequence};

    #[test]
    fn test_entering_composition_order() {
        let eseq = EscapeSequence {
            fg: Some("#ff0000".to_string()),
            bold: true,
            ..EscapeSequence::default()
        };
        assert_eq!(eseq.color_string(), "\x1b[38;2;255;0;0;01m");
    }

    #[test]
    fn test_entering_with_background() {
        let mut eseq = EscapeSequence::with_fg("#000000", ColorMode::TrueColor);
        eseq.set_bg("#202020");
        eseq.italic = true;
        assert_eq!(eseq.color_string(), "\x1b[38;2;0;0;0;48;2;32;32;32;03m");
    }

    #[test]
    fn test_plain_sequence_is_empty() {
        let eseq = EscapeSequence::plain(ColorMode::TrueColor);
        assert_eq!(eseq.color_string(), "");
        assert_eq!(eseq.reset_string(), "");
    }

    #[test]
    fn test_reset_minimality() {
        let fg_only = EscapeSequence::with_fg("#ff0000", ColorMode::TrueColor);
        assert_eq!(fg_only.reset_string(), "\x1b[39m");
        assert!(!fg_only.reset_string().contains("49"));

        let bg_only = EscapeSequence::with_bg("#202020", ColorMode::TrueColor);
        assert_eq!(bg_only.reset_string(), "\x1b[49m");
        assert!(!bg_only.reset_string().contains("39"));

        let bold_only = EscapeSequence {
            bold: true,
            ..EscapeSequence::default()
        };
        assert_eq!(bold_only.reset_string(), "\x1b[00m");
    }

    #[test]
    fn test_indexed_mode_uses_palette_codes() {
        let eseq = EscapeSequence::with_fg("#000000", ColorMode::Indexed);
        assert_eq!(eseq.color_string(), "\x1b[38;5;0m");

        let white = EscapeSequence::with_fg("#ffffff", ColorMode::Indexed);
        assert_eq!(white.color_string(), "\x1b[38;5;15m");
    }

    #[test]
    fn test_named_colors_resolve_at_construction() {
        let eseq = EscapeSequence::with_fg("#ansired", ColorMode::TrueColor);
        assert_eq!(eseq.fg.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_full_reset() {
        assert_eq!(EscapeSequence::full_reset_string(), "\x1b[39;49;00m");
    }

    #[test]
    fn test_stylize_wraps_text() {
        let eseq = EscapeSequence::with_fg("#ff0000", ColorMode::TrueColor);
        assert_eq!(eseq.stylize("hi"), "\x1b[38;2;255;0;0mhi\x1b[39m");
    }
}

#[cfg(test)]
mod wrap_tests {
    use crate::wrap::rewrap;

    #[test]
    fn test_wrap_preserves_paragraph_boundary() {
        let input = "one two three four five six seven\n\neight nine ten\n";
        let wrapped = rewrap(input, 20);

        let blank_lines = wrapped.lines().filter(|l| l.trim().is_empty()).count();
        assert_eq!(blank_lines, 1);
    }

    #[test]
    fn test_wrap_respects_width() {
        let input = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod";
        for line in rewrap(input, 20).lines() {
            assert!(line.len() <= 20, "line too long: {:?}", line);
        }
    }

    #[test]
    fn test_wrap_preserves_multiple_blank_lines() {
        let input = "a\n\n\n\nb\n";
        let wrapped = rewrap(input, 40);
        assert_eq!(wrapped, "a\n\n\n\nb\n");
    }

    #[test]
    fn test_wrap_joins_source_lines_within_paragraph() {
        let input = "alpha\nbeta\n";
        assert_eq!(rewrap(input, 40), "alpha beta\n");
    }
}

#[cfg(test)]
mod theme_tests {
    use std::io::Write;

    use crate::escape::ColorMode;
    use crate::theme::{parse_spec, Theme, DEFAULT_THEME};

    #[test]
    fn test_unknown_theme_falls_back_to_default() {
        let theme = Theme::load("no_such_theme");
        assert_eq!(theme.name, DEFAULT_THEME);
    }

    #[test]
    fn test_builtin_themes_cover_all_classes() {
        for name in ["native", "solarized", "github"] {
            let theme = Theme::load(name);
            assert_eq!(theme.name, name);
            for class in crate::theme::TOKEN_CLASSES {
                assert!(
                    theme.styles.contains_key(*class),
                    "{} missing class {}",
                    name,
                    class
                );
            }
        }
    }

    #[test]
    fn test_parse_spec_full_form() {
        let eseq = parse_spec("#cb4b16 bg:#202020 bold underline italic", ColorMode::TrueColor);
        assert_eq!(eseq.fg.as_deref(), Some("#cb4b16"));
        assert_eq!(eseq.bg.as_deref(), Some("#202020"));
        assert!(eseq.bold && eseq.underline && eseq.italic);
    }

    #[test]
    fn test_parse_spec_empty_is_plain() {
        let eseq = parse_spec("", ColorMode::TrueColor);
        assert_eq!(eseq.color_string(), "");
    }

    #[test]
    fn test_parse_spec_resolves_named_colors() {
        let eseq = parse_spec("#ansiblue bold", ColorMode::TrueColor);
        assert_eq!(eseq.fg.as_deref(), Some("#6060ff"));
    }

    #[test]
    fn test_theme_file_overrides_and_inherits() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r##"{{"styles": {{"heading": "#112233", "bogus_class": "#000000"}}, "highlight": "InspiredGitHub"}}"##
        )
        .expect("write theme file");

        let theme = Theme::from_file(file.path()).expect("load theme file");
        assert_eq!(theme.spec("heading"), "#112233");
        // unmentioned classes inherit the default theme
        assert_eq!(theme.spec("emph"), "italic");
        // unknown classes are dropped
        assert_eq!(theme.spec("bogus_class"), "");
        assert_eq!(theme.highlight, "InspiredGitHub");
    }

    #[test]
    fn test_theme_file_invalid_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "not json").expect("write theme file");
        assert!(Theme::from_file(file.path()).is_err());
    }
}

#[cfg(test)]
mod styler_tests {
    use crate::color::reshade;
    use crate::escape::ColorMode;
    use crate::parser::{Node, NodeKind};
    use crate::renderer::Styler;
    use crate::theme::Theme;

    fn native_styler() -> Styler {
        Styler::new(&Theme::load("native"), ColorMode::TrueColor)
    }

    #[test]
    fn test_enter_exit_balances_stack() {
        let mut styler = native_styler();
        let mut out = Vec::new();
        let node = Node::new(NodeKind::Emph, 0);

        styler.enter(&node, &mut out).expect("enter");
        assert_eq!(styler.depth(), 1);
        styler.exit(&node, &mut out).expect("exit");
        assert_eq!(styler.depth(), 0);
    }

    #[test]
    fn test_unstyled_kind_pushes_noop() {
        let mut styler = native_styler();
        let mut out = Vec::new();
        let node = Node::new(NodeKind::Paragraph, 0);

        styler.enter(&node, &mut out).expect("enter");
        assert_eq!(styler.depth(), 1);
        // neutral style writes nothing but still balances
        assert!(out.is_empty());
        styler.exit(&node, &mut out).expect("exit");
        assert!(out.is_empty());
    }

    #[test]
    fn test_heading_shading_darkens_by_level() {
        let mut styler = native_styler();

        let mut level1 = Vec::new();
        styler
            .enter(&Node::new(NodeKind::Heading(Some(1)), 0), &mut level1)
            .expect("enter");

        let mut level3 = Vec::new();
        styler
            .enter(&Node::new(NodeKind::Heading(Some(3)), 1), &mut level3)
            .expect("enter");

        let shaded = reshade("#cb4b16", 0.8);
        let (r, g, b) = crate::color::to_rgb(&shaded);
        let expected = format!("\x1b[38;2;{};{};{};01m", r, g, b);

        assert_eq!(String::from_utf8(level1).expect("utf8"), "\x1b[38;2;203;75;22;01m");
        assert_eq!(String::from_utf8(level3).expect("utf8"), expected);
    }

    #[test]
    fn test_heading_level_none_defaults_to_one() {
        let mut styler = native_styler();
        let mut out = Vec::new();
        styler
            .enter(&Node::new(NodeKind::Heading(None), 0), &mut out)
            .expect("enter");
        assert_eq!(String::from_utf8(out).expect("utf8"), "\x1b[38;2;203;75;22;01m");
    }

    #[test]
    fn test_exit_reemits_parent_style() {
        let mut styler = native_styler();
        let mut out = Vec::new();

        let strong = Node::new(NodeKind::Strong, 0);
        let emph = Node::new(NodeKind::Emph, 1);

        styler.enter(&strong, &mut out).expect("enter strong");
        styler.enter(&emph, &mut out).expect("enter emph");
        out.clear();
        styler.exit(&emph, &mut out).expect("exit emph");

        // pop resets italic, then the surrounding bold is re-applied
        assert_eq!(String::from_utf8(out).expect("utf8"), "\x1b[00m\x1b[01m");
    }
}

#[cfg(test)]
mod parser_tests {
    use crate::parser::{parse, ListMarker, Node, NodeKind};

    fn collect_origins(node: &Node, origins: &mut Vec<usize>) {
        origins.push(node.origin);
        for child in &node.children {
            collect_origins(child, origins);
        }
    }

    #[test]
    fn test_basic_document_shape() {
        let tree = parse("# Title\n\nSome text");

        assert_eq!(tree.kind, NodeKind::Document);
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].kind, NodeKind::Heading(Some(1)));
        assert_eq!(
            tree.children[0].children[0].kind,
            NodeKind::Text("Title".to_string())
        );
        assert_eq!(tree.children[1].kind, NodeKind::Paragraph);
    }

    #[test]
    fn test_origins_are_unique() {
        let tree = parse("# a\n\n- x\n- y\n\n1. z\n\n> q\n");
        let mut origins = Vec::new();
        collect_origins(&tree, &mut origins);

        let mut deduped = origins.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), origins.len());
    }

    #[test]
    fn test_tight_items_gain_a_paragraph() {
        let tree = parse("- a\n- b\n");
        let list = &tree.children[0];

        assert!(matches!(list.kind, NodeKind::List(_)));
        for item in &list.children {
            assert_eq!(item.kind, NodeKind::Item);
            assert_eq!(item.children.len(), 1);
            assert_eq!(item.children[0].kind, NodeKind::Paragraph);
        }
    }

    #[test]
    fn test_ordered_list_start_value() {
        let tree = parse("5. x\n6. y\n");
        match tree.children[0].kind {
            NodeKind::List(data) => {
                assert_eq!(data.marker, ListMarker::Ordered { start: 5 });
            }
            ref other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_code_block_literal_and_info() {
        let tree = parse("```rust\nfn x() {}\n```\n");
        match &tree.children[0].kind {
            NodeKind::CodeBlock { info, literal } => {
                assert_eq!(info, "rust");
                assert_eq!(literal, "fn x() {}\n");
            }
            other => panic!("expected code block, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_list_inside_item() {
        let tree = parse("- a\n  - b\n");
        let outer = &tree.children[0];
        let item = &outer.children[0];

        // normalized: paragraph for the inline run, then the nested list
        assert_eq!(item.children.len(), 2);
        assert_eq!(item.children[0].kind, NodeKind::Paragraph);
        assert!(matches!(item.children[1].kind, NodeKind::List(_)));
    }
}

mod renderer_tests {
    use crate::parser::{Node, NodeKind};
    use crate::renderer::{RenderOptions, Renderer};
    use crate::theme::Theme;

    fn render_tree(root: &Node) -> String {
        let options = RenderOptions::default();
        let mut renderer = Renderer::new(&options, Theme::load("native"));
        let mut out = Vec::new();
        renderer.render_tree(root, &mut out).expect("render failed");
        String::from_utf8(out).expect("output is not valid UTF-8")
    }

    #[test]
    fn test_unrecognized_kind_contributes_nothing() {
        let mut para_a = Node::new(NodeKind::Paragraph, 1);
        para_a
            .children
            .push(Node::new(NodeKind::Text("alpha".into()), 2));
        let unknown = Node::new(NodeKind::Unknown("table".into()), 3);
        let mut para_b = Node::new(NodeKind::Paragraph, 4);
        para_b
            .children
            .push(Node::new(NodeKind::Text("beta".into()), 5));

        let mut root = Node::new(NodeKind::Document, 0);
        root.children.extend([para_a, unknown, para_b]);

        // the unrecognized node is logged but emits nothing; the walk
        // continues to the styled siblings and the stack stays balanced
        // (render_tree debug-asserts a zero depth on return)
        assert_eq!(render_tree(&root), "alpha\n\n\nbeta\n");
    }
}
