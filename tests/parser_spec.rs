mod setup;

use mathtex::{
    Settings, StrictSetting, TrustSetting,
    macro_expander::MacroMap,
    macros::MacroDefinition,
    parser::parse_node::{ParseNode, ParseNodeOp},
    symbols::Atom,
    types::StyleVariant,
};
use setup::*;

// Every function is equivalent to a "describe" block.

#[test]
fn a_parser() {
    it("should not fail on an empty string", || {
        expect!("").to_parse(&strict_settings())
    });

    it("should ignore whitespace", || {
        expect!("    x    y    ").to_parse_like("xy", &strict_settings())
    });

    it("should ignore whitespace around scripts", || {
        expect!("x   ^   y").to_parse_like("x^y", &strict_settings())
    });

    it("should require the input to be fully consumed", || {
        expect!("x}").not_to_parse(&strict_settings())?;
        expect!("{x").not_to_parse(&strict_settings())
    });
}

#[test]
fn an_ord_parser() {
    let expression = "1234|/@.\"`abcdefgzABCDEFGZ";

    it("should not fail", || {
        expect!(expression).to_parse(&strict_settings())
    });

    it("should build a list of ords", || {
        let parsed = get_parsed_strict(expression)?;
        for node in &parsed {
            assert!(
                matches!(node, ParseNode::MathOrd(_) | ParseNode::TextOrd(_)),
                "expected an ord, got {node:?}"
            );
        }
        Ok(())
    });

    it("should parse the right number of ords", || {
        let parsed = get_parsed_strict(expression)?;
        assert_eq!(parsed.len(), expression.chars().count());
        Ok(())
    });
}

#[test]
fn a_bin_parser() {
    let expression = r"+-*\cdot\pm\div";

    it("should build a list of bins", || {
        let parsed = get_parsed_strict(expression)?;
        for node in parsed {
            assert_let!(ParseNode::Atom(atom) = &node);
            assert_eq!(atom.family, Atom::Bin);
        }
        Ok(())
    });
}

#[test]
fn a_rel_parser() {
    let expression = r"=<>\leq\geq\neq\in\cong";

    it("should build a list of rels", || {
        let parsed = get_parsed_strict(expression)?;
        for node in parsed {
            assert_let!(ParseNode::Atom(atom) = &node);
            assert_eq!(atom.family, Atom::Rel);
        }
        Ok(())
    });
}

#[test]
fn a_punct_parser() {
    it("should build a list of puncts", || {
        let parsed = get_parsed_strict(",;")?;
        for node in parsed {
            assert_let!(ParseNode::Atom(atom) = &node);
            assert_eq!(atom.family, Atom::Punct);
        }
        Ok(())
    });
}

#[test]
fn an_open_and_close_parser() {
    it("should build opens and closes", || {
        let parsed = get_parsed_strict("([)]?!")?;
        let families: Vec<Atom> = parsed
            .iter()
            .map(|node| {
                assert_let!(ParseNode::Atom(atom) = node);
                atom.family
            })
            .collect();
        assert_eq!(
            families,
            vec![
                Atom::Open,
                Atom::Open,
                Atom::Close,
                Atom::Close,
                Atom::Close,
                Atom::Close
            ]
        );
        Ok(())
    });
}

#[test]
fn a_subscript_and_superscript_parser() {
    it("should parse x^2 into the documented shape", || {
        let parsed = get_parsed_strict("x^2")?;
        assert_eq!(parsed.len(), 1);
        assert_let!(ParseNode::SupSub(supsub) = &parsed[0]);
        assert_let!(Some(base) = &supsub.base);
        assert_let!(ParseNode::MathOrd(x) = base.as_ref());
        assert_eq!(x.text, "x");
        assert_let!(Some(sup) = &supsub.sup);
        assert_let!(ParseNode::TextOrd(two) = sup.as_ref());
        assert_eq!(two.text, "2");
        assert!(supsub.sub.is_none());
        Ok(())
    });

    it("should parse subscripts and both-script combinations", || {
        let parsed = get_parsed_strict("x_1^2")?;
        assert_let!(ParseNode::SupSub(supsub) = &parsed[0]);
        assert!(supsub.sup.is_some());
        assert!(supsub.sub.is_some());
        expect!("x_1^2").to_parse_like("x^2_1", &strict_settings())
    });

    it("should parse a script with an empty base", || {
        let parsed = get_parsed_strict("^3")?;
        assert_let!(ParseNode::SupSub(supsub) = &parsed[0]);
        assert!(supsub.base.is_none());
        assert!(supsub.sup.is_some());
        Ok(())
    });

    it("should reject double scripts", || {
        expect!("x^a^b").not_to_parse(&strict_settings())?;
        expect!("x_a_b").not_to_parse(&strict_settings())?;
        expect!("x^a'").not_to_parse(&strict_settings())
    });

    it("should parse braced script groups", || {
        let parsed = get_parsed_strict("x^{2+3}")?;
        assert_let!(ParseNode::SupSub(supsub) = &parsed[0]);
        assert_let!(Some(sup) = &supsub.sup);
        assert_let!(ParseNode::OrdGroup(group) = sup.as_ref());
        assert_eq!(group.body.len(), 3);
        Ok(())
    });

    it("should reject a function without arguments as a script", || {
        expect!(r"x^\frac").not_to_parse(&strict_settings())?;
        expect!(r"x^\over").not_to_parse(&strict_settings())
    });
}

#[test]
fn a_prime_parser() {
    it("should parse x'' into a group of primes", || {
        let parsed = get_parsed_strict("x''")?;
        assert_let!(ParseNode::SupSub(supsub) = &parsed[0]);
        assert_let!(Some(sup) = &supsub.sup);
        assert_let!(ParseNode::OrdGroup(group) = sup.as_ref());
        assert_eq!(group.body.len(), 2);
        for node in &group.body {
            assert_let!(ParseNode::TextOrd(ord) = node);
            assert_eq!(ord.text, "\\prime");
        }
        Ok(())
    });

    it("should append a superscript group after the prime run", || {
        let parsed = get_parsed_strict("x'^2")?;
        assert_let!(ParseNode::SupSub(supsub) = &parsed[0]);
        assert_let!(Some(sup) = &supsub.sup);
        assert_let!(ParseNode::OrdGroup(group) = sup.as_ref());
        assert_eq!(group.body.len(), 2);
        assert_let!(ParseNode::TextOrd(prime) = &group.body[0]);
        assert_eq!(prime.text, "\\prime");
        assert_let!(ParseNode::TextOrd(two) = &group.body[1]);
        assert_eq!(two.text, "2");
        Ok(())
    });

    it("should allow a subscript alongside primes", || {
        expect!("x'_3").to_parse(&strict_settings())
    });
}

#[test]
fn a_limits_parser() {
    it("should set limits on operators", || {
        let parsed = get_parsed_strict(r"\sum\nolimits_n")?;
        assert_let!(ParseNode::SupSub(supsub) = &parsed[0]);
        assert_let!(Some(base) = &supsub.base);
        assert_let!(ParseNode::Op(op) = base.as_ref());
        assert!(!op.limits());
        Ok(())
    });

    it("should work on the starred operatorname", || {
        let parsed = get_parsed_strict(r"\operatorname*{arg\,max}\limits_x")?;
        assert_let!(ParseNode::SupSub(supsub) = &parsed[0]);
        assert_let!(Some(base) = &supsub.base);
        assert_let!(ParseNode::OperatorName(op) = base.as_ref());
        assert!(op.limits);
        assert!(op.always_handle_sup_sub);
        Ok(())
    });

    it("should fail after a plain symbol", || {
        expect!(r"x\limits_2").not_to_parse(&strict_settings())
    });

    it("should fail after plain operatorname", || {
        expect!(r"\operatorname{sn}\limits_x").not_to_parse(&strict_settings())
    });
}

#[test]
fn a_group_parser() {
    it("should parse brace groups", || {
        let parsed = get_parsed_strict("{xy}")?;
        assert_eq!(parsed.len(), 1);
        assert_let!(ParseNode::OrdGroup(group) = &parsed[0]);
        assert_eq!(group.body.len(), 2);
        assert_eq!(group.semisimple, None);
        Ok(())
    });

    it("should mark begingroup groups semisimple", || {
        let parsed = get_parsed_strict(r"\begingroup xy\endgroup")?;
        assert_let!(ParseNode::OrdGroup(group) = &parsed[0]);
        assert_eq!(group.body.len(), 2);
        assert_eq!(group.semisimple, Some(true));
        Ok(())
    });

    it("should require groups to close", || {
        expect!("{x").not_to_parse(&strict_settings())?;
        expect!(r"\begingroup x").not_to_parse(&strict_settings())?;
        expect!(r"\begingroup x}").not_to_parse(&strict_settings())
    });
}

#[test]
fn a_function_parser() {
    it("should parse a two-argument function", || {
        let parsed = get_parsed_strict(r"\frac{1}{2}")?;
        assert_eq!(parsed.len(), 1);
        assert_let!(ParseNode::Genfrac(frac) = &parsed[0]);
        assert!(frac.has_bar_line);
        assert_let!(ParseNode::OrdGroup(numer) = &frac.numer);
        assert_let!(ParseNode::TextOrd(one) = &numer.body[0]);
        assert_eq!(one.text, "1");
        assert_let!(ParseNode::OrdGroup(denom) = &frac.denom);
        assert_let!(ParseNode::TextOrd(two) = &denom.body[0]);
        assert_eq!(two.text, "2");
        Ok(())
    });

    it("should parse unbraced single-token arguments", || {
        expect!(r"\frac 1 2").to_parse(&strict_settings())?;
        expect!(r"\frac12").to_parse(&strict_settings())
    });

    it("should fail when arguments are missing", || {
        expect!(r"\frac{1}").not_to_parse(&strict_settings())
    });

    it("should enforce modes", || {
        expect!(r"\text{\frac{1}{2}}").not_to_parse(&strict_settings())
    });

    it("should reject an undefined command by default", || {
        expect!(r"\foo").not_to_parse(&strict_settings())
    });

    it("should degrade an undefined command when not throwing", || {
        let parsed = get_parsed(r"\foo", &nonstrict_settings())?;
        assert_eq!(parsed.len(), 1);
        assert_let!(ParseNode::Color(color) = &parsed[0]);
        assert_eq!(color.color, "#cc0000");
        assert_let!(ParseNode::Text(text) = &color.body[0]);
        // One textord per character of "\foo".
        assert_eq!(text.body.len(), 4);
        Ok(())
    });
}

#[test]
fn an_infix_parser() {
    it("should rewrite \\over into a fraction", || {
        let parsed = get_parsed_strict(r"{1 \over 2}")?;
        assert_let!(ParseNode::OrdGroup(group) = &parsed[0]);
        assert_eq!(group.body.len(), 1);
        assert_let!(ParseNode::Genfrac(frac) = &group.body[0]);
        assert!(frac.has_bar_line);
        assert_let!(ParseNode::OrdGroup(numer) = &frac.numer);
        assert_eq!(numer.body.len(), 1);
        Ok(())
    });

    it("should rewrite at top level too", || {
        let parsed = get_parsed_strict(r"a \over b")?;
        assert_eq!(parsed.len(), 1);
        assert!(matches!(parsed[0], ParseNode::Genfrac(_)));
        Ok(())
    });

    it("should rewrite \\choose with delimiters and no bar", || {
        let parsed = get_parsed_strict(r"{a \choose b}")?;
        assert_let!(ParseNode::OrdGroup(group) = &parsed[0]);
        assert_let!(ParseNode::Genfrac(frac) = &group.body[0]);
        assert!(!frac.has_bar_line);
        assert_eq!(frac.left_delim.as_deref(), Some("("));
        assert_eq!(frac.right_delim.as_deref(), Some(")"));
        Ok(())
    });

    it("should allow only one infix operator per group", || {
        expect!(r"a \over b \over c").not_to_parse(&strict_settings())?;
        expect!(r"a \over b \choose c").not_to_parse(&strict_settings())
    });

    it("should rewrite independently per group", || {
        let parsed = get_parsed_strict(r"a {b \over c} {d \over e}")?;
        assert_eq!(parsed.len(), 3);
        assert_let!(ParseNode::OrdGroup(first) = &parsed[1]);
        assert!(matches!(first.body[0], ParseNode::Genfrac(_)));
        assert_let!(ParseNode::OrdGroup(second) = &parsed[2]);
        assert!(matches!(second.body[0], ParseNode::Genfrac(_)));
        Ok(())
    });

    it("should thread the bar size of \\above", || {
        let parsed = get_parsed_strict(r"{1 \above1pt 2}")?;
        assert_let!(ParseNode::OrdGroup(group) = &parsed[0]);
        assert_let!(ParseNode::Genfrac(frac) = &group.body[0]);
        assert!(frac.has_bar_line);
        assert_let!(Some(bar_size) = &frac.bar_size);
        assert_eq!(bar_size.number, 1.0);
        assert_eq!(bar_size.unit, "pt");
        Ok(())
    });

    it("should treat an empty \\above size as a blank bar", || {
        let parsed = get_parsed_strict(r"{1 \above{} 2}")?;
        assert_let!(ParseNode::OrdGroup(group) = &parsed[0]);
        assert_let!(ParseNode::Genfrac(frac) = &group.body[0]);
        assert!(!frac.has_bar_line);
        Ok(())
    });
}

#[test]
fn a_genfrac_parser() {
    it("should parse the six explicit arguments", || {
        let parsed = get_parsed_strict(r"\genfrac(]{0.8pt}{0}{a}{b}")?;
        assert_let!(ParseNode::Genfrac(frac) = &parsed[0]);
        assert_eq!(frac.left_delim.as_deref(), Some("("));
        assert_eq!(frac.right_delim.as_deref(), Some("]"));
        assert_let!(Some(bar_size) = &frac.bar_size);
        assert_eq!(bar_size.number, 0.8);
        assert_eq!(frac.size, Some(StyleVariant::Display));
        Ok(())
    });

    it("should draw the default bar for an empty thickness", || {
        let parsed = get_parsed_strict(r"\genfrac{}{}{}{}{a}{b}")?;
        assert_let!(ParseNode::Genfrac(frac) = &parsed[0]);
        assert!(frac.has_bar_line);
        assert!(frac.bar_size.is_none());
        assert_eq!(frac.left_delim, None);
        assert_eq!(frac.size, None);
        Ok(())
    });

    it("should reject a bad style digit", || {
        expect!(r"\genfrac{}{}{}{9}{a}{b}").not_to_parse(&strict_settings())
    });
}

#[test]
fn a_color_parser() {
    it("should parse hex and named colors", || {
        let parsed = get_parsed_strict(r"\textcolor{#fff}{x}")?;
        assert_let!(ParseNode::Color(color) = &parsed[0]);
        assert_eq!(color.color, "#fff");
        assert_eq!(color.body.len(), 1);

        let parsed = get_parsed_strict(r"\textcolor{blue}{x}")?;
        assert_let!(ParseNode::Color(color) = &parsed[0]);
        assert_eq!(color.color, "blue");
        Ok(())
    });

    it("should supply the missing # on bare six-digit hex", || {
        let parsed = get_parsed_strict(r"\textcolor{1a2b3c}{x}")?;
        assert_let!(ParseNode::Color(color) = &parsed[0]);
        assert_eq!(color.color, "#1a2b3c");
        Ok(())
    });

    it("should reject malformed colors", || {
        expect!(r"\textcolor{#ffff}{x}").not_to_parse(&strict_settings())?;
        expect!(r"\textcolor{1a2b3}{x}").not_to_parse(&strict_settings())
    });

    it("should let \\color wrap its trailing siblings", || {
        let parsed = get_parsed_strict(r"a \color{red} b c")?;
        assert_eq!(parsed.len(), 2);
        assert_let!(ParseNode::Color(color) = &parsed[1]);
        assert_eq!(color.color, "red");
        assert_eq!(color.body.len(), 2);
        Ok(())
    });

    it("should stop \\color at the group boundary", || {
        let parsed = get_parsed_strict(r"{a \color{red} b} c")?;
        assert_eq!(parsed.len(), 2);
        Ok(())
    });

    it("should treat \\color as \\textcolor when configured", || {
        let settings = Settings::builder()
            .color_is_text_color(true)
            .strict(StrictSetting::Bool(true))
            .build();
        let parsed = get_parsed(r"\color{red}{a}b", &settings)?;
        assert_eq!(parsed.len(), 2);
        assert_let!(ParseNode::Color(color) = &parsed[0]);
        assert_eq!(color.body.len(), 1);
        Ok(())
    });
}

#[test]
fn a_size_parser() {
    it("should parse an unbraced size by maximal munch", || {
        let parsed = get_parsed_strict(r"\kern1.5em x")?;
        assert_eq!(parsed.len(), 2);
        assert_let!(ParseNode::Kern(kern) = &parsed[0]);
        assert_eq!(kern.dimension.number, 1.5);
        assert_eq!(kern.dimension.unit, "em");
        Ok(())
    });

    it("should parse braced and negative sizes", || {
        let parsed = get_parsed_strict(r"\kern{-2pt}")?;
        assert_let!(ParseNode::Kern(kern) = &parsed[0]);
        assert_eq!(kern.dimension.number, -2.0);
        assert_eq!(kern.dimension.unit, "pt");
        Ok(())
    });

    it("should accept mu units in \\mkern", || {
        let parsed = get_parsed_strict(r"\mkern18mu")?;
        assert_let!(ParseNode::Kern(kern) = &parsed[0]);
        assert_eq!(kern.dimension.unit, "mu");
        Ok(())
    });

    it("should flag unit mismatches only under strict", || {
        expect!(r"\mkern1em").not_to_parse(&strict_settings())?;
        expect!(r"\mkern1em").to_parse(&nonstrict_settings())?;
        expect!(r"\kern1mu").to_parse(&nonstrict_settings())
    });

    it("should reject invalid sizes and units", || {
        expect!(r"\kern{1.5zz}").not_to_parse(&strict_settings())?;
        expect!(r"\kern{huge}").not_to_parse(&strict_settings())?;
        expect!(r"\kern x").not_to_parse(&strict_settings())
    });
}

#[test]
fn a_rule_parser() {
    it("should parse width and height", || {
        let parsed = get_parsed_strict(r"\rule{1em}{2em}")?;
        assert_let!(ParseNode::Rule(rule) = &parsed[0]);
        assert!(rule.shift.is_none());
        assert_eq!(rule.width.number, 1.0);
        assert_eq!(rule.height.number, 2.0);
        Ok(())
    });

    it("should parse the optional shift", || {
        let parsed = get_parsed_strict(r"\rule[0.5em]{1em}{2em}")?;
        assert_let!(ParseNode::Rule(rule) = &parsed[0]);
        assert_let!(Some(shift) = &rule.shift);
        assert_eq!(shift.number, 0.5);
        Ok(())
    });
}

#[test]
fn a_sqrt_parser() {
    it("should parse a plain root", || {
        let parsed = get_parsed_strict(r"\sqrt{x}")?;
        assert_let!(ParseNode::Sqrt(sqrt) = &parsed[0]);
        assert!(sqrt.index.is_none());
        Ok(())
    });

    it("should parse the optional index", || {
        let parsed = get_parsed_strict(r"\sqrt[3]{x}")?;
        assert_let!(ParseNode::Sqrt(sqrt) = &parsed[0]);
        assert_let!(Some(index) = &sqrt.index);
        assert_let!(ParseNode::OrdGroup(group) = index);
        assert_eq!(group.body.len(), 1);
        Ok(())
    });
}

#[test]
fn a_left_right_parser() {
    it("should parse a delimited expression", || {
        let parsed = get_parsed_strict(r"\left( x \right)")?;
        assert_let!(ParseNode::LeftRight(leftright) = &parsed[0]);
        assert_eq!(leftright.left, "(");
        assert_eq!(leftright.right, ")");
        assert_eq!(leftright.body.len(), 1);
        Ok(())
    });

    it("should accept empty delimiters", || {
        let parsed = get_parsed_strict(r"\left. x \right.")?;
        assert_let!(ParseNode::LeftRight(leftright) = &parsed[0]);
        assert_eq!(leftright.left, ".");
        assert_eq!(leftright.right, ".");
        Ok(())
    });

    it("should allow \\middle between \\left and \\right", || {
        let parsed = get_parsed_strict(r"\left\{ x \middle| y \right\}")?;
        assert_let!(ParseNode::LeftRight(leftright) = &parsed[0]);
        assert!(leftright
            .body
            .iter()
            .any(|node| matches!(node, ParseNode::Middle(_))));
        Ok(())
    });

    it("should reject \\middle outside \\left...\\right", || {
        expect!(r"\middle| x").not_to_parse(&strict_settings())
    });

    it("should reject invalid delimiters", || {
        expect!(r"\left x \right)").not_to_parse(&strict_settings())?;
        expect!(r"\left( x \right x").not_to_parse(&strict_settings())
    });

    it("should require the closing \\right", || {
        expect!(r"\left( x").not_to_parse(&strict_settings())
    });

    it("should pick up the current color on \\right", || {
        let parsed = get_parsed_strict(r"{\color{red} \left( x \right)}")?;
        assert_let!(ParseNode::OrdGroup(group) = &parsed[0]);
        assert_let!(ParseNode::Color(color) = &group.body[0]);
        assert_let!(ParseNode::LeftRight(leftright) = &color.body[0]);
        assert_eq!(leftright.right_color.as_deref(), Some("red"));
        Ok(())
    });
}

#[test]
fn an_op_parser() {
    it("should parse named functions without limits", || {
        let parsed = get_parsed_strict(r"\sin x")?;
        assert_let!(ParseNode::Op(op) = &parsed[0]);
        assert!(!op.limits());
        assert_let!(ParseNodeOp::Symbol { symbol, .. } = op);
        assert!(!symbol);
        Ok(())
    });

    it("should parse big operators with limits", || {
        let parsed = get_parsed_strict(r"\sum_1^n")?;
        assert_let!(ParseNode::SupSub(supsub) = &parsed[0]);
        assert_let!(Some(base) = &supsub.base);
        assert_let!(ParseNode::Op(op) = base.as_ref());
        assert!(op.limits());
        Ok(())
    });

    it("should map bare Unicode operators to their commands", || {
        let parsed = get_parsed_strict("\u{2211}")?;
        assert_let!(ParseNode::Op(op) = &parsed[0]);
        assert_let!(ParseNodeOp::Symbol { name, .. } = op);
        assert_eq!(name, "\\sum");
        Ok(())
    });

    it("should parse \\mathop bodies", || {
        let parsed = get_parsed_strict(r"\mathop{+}")?;
        assert_let!(ParseNode::Op(op) = &parsed[0]);
        assert_let!(ParseNodeOp::Body { body, .. } = op);
        assert_eq!(body.len(), 1);
        Ok(())
    });
}

#[test]
fn a_text_parser() {
    it("should keep spaces significant", || {
        let parsed = get_parsed_strict(r"\text{a b}")?;
        assert_let!(ParseNode::Text(text) = &parsed[0]);
        assert_eq!(text.body.len(), 3);
        assert!(matches!(text.body[1], ParseNode::Spacing(_)));
        Ok(())
    });

    it("should record the font of the variant commands", || {
        let parsed = get_parsed_strict(r"\textbf{x}")?;
        assert_let!(ParseNode::Text(text) = &parsed[0]);
        assert_eq!(text.font.as_deref(), Some("\\textbf"));

        let parsed = get_parsed_strict(r"\text{x}")?;
        assert_let!(ParseNode::Text(text) = &parsed[0]);
        assert_eq!(text.font, None);
        Ok(())
    });

    it("should nest text commands", || {
        expect!(r"\text{a\textbf{b}c}").to_parse(&strict_settings())
    });

    it("should reject scripts in text mode", || {
        expect!(r"\text{x^2}").not_to_parse(&strict_settings())
    });
}

#[test]
fn a_ligature_former() {
    it("should form en and em dashes", || {
        let parsed = get_parsed_strict(r"\text{a--b}")?;
        assert_let!(ParseNode::Text(text) = &parsed[0]);
        assert_eq!(text.body.len(), 3);
        assert_let!(ParseNode::TextOrd(dash) = &text.body[1]);
        assert_eq!(dash.text, "--");

        let parsed = get_parsed_strict(r"\text{a---b}")?;
        assert_let!(ParseNode::Text(text) = &parsed[0]);
        assert_eq!(text.body.len(), 3);
        assert_let!(ParseNode::TextOrd(dash) = &text.body[1]);
        assert_eq!(dash.text, "---");
        Ok(())
    });

    it("should form quote ligatures", || {
        let parsed = get_parsed_strict(r"\text{``a''}")?;
        assert_let!(ParseNode::Text(text) = &parsed[0]);
        assert_eq!(text.body.len(), 3);
        assert_let!(ParseNode::TextOrd(open) = &text.body[0]);
        assert_eq!(open.text, "``");
        assert_let!(ParseNode::TextOrd(close) = &text.body[2]);
        assert_eq!(close.text, "''");
        Ok(())
    });

    it("should not form ligatures in math mode", || {
        let parsed = get_parsed_strict("a--b")?;
        assert_eq!(parsed.len(), 4);
        Ok(())
    });

    it("should leave a lone trailing dash", || {
        let parsed = get_parsed_strict(r"\text{----}")?;
        assert_let!(ParseNode::Text(text) = &parsed[0]);
        assert_eq!(text.body.len(), 2);
        assert_let!(ParseNode::TextOrd(em) = &text.body[0]);
        assert_eq!(em.text, "---");
        assert_let!(ParseNode::TextOrd(single) = &text.body[1]);
        assert_eq!(single.text, "-");
        Ok(())
    });
}

#[test]
fn a_verb_parser() {
    it("should parse the body verbatim", || {
        let parsed = get_parsed_strict(r"\verb|x^ 2|")?;
        assert_let!(ParseNode::Verb(verb) = &parsed[0]);
        assert_eq!(verb.body, "x^ 2");
        assert!(!verb.star);
        Ok(())
    });

    it("should recognize the starred form", || {
        let parsed = get_parsed_strict(r"\verb*|a b|")?;
        assert_let!(ParseNode::Verb(verb) = &parsed[0]);
        assert_eq!(verb.body, "a b");
        assert!(verb.star);
        Ok(())
    });

    it("should support arbitrary delimiters", || {
        let parsed = get_parsed_strict(r"\verb!|x|!")?;
        assert_let!(ParseNode::Verb(verb) = &parsed[0]);
        assert_eq!(verb.body, "|x|");
        Ok(())
    });

    it("should fail when the delimiter never closes", || {
        expect!(r"\verb|x").not_to_parse(&strict_settings())
    });
}

#[test]
fn a_url_parser() {
    it("should parse a URL when trusted", || {
        let parsed = get_parsed_trust(r"\url{http://example.com/}")?;
        assert_let!(ParseNode::Href(href) = &parsed[0]);
        assert_eq!(href.href, "http://example.com/");
        Ok(())
    });

    it("should allow raw percent characters", || {
        let parsed = get_parsed_trust(r"\url{http://a.b/%7Euser}")?;
        assert_let!(ParseNode::Href(href) = &parsed[0]);
        assert_eq!(href.href, "http://a.b/%7Euser");
        Ok(())
    });

    it("should unescape hyperref-style escapes", || {
        let parsed = get_parsed_trust(r"\url{http://a.b/\%7Eu\#frag}")?;
        assert_let!(ParseNode::Href(href) = &parsed[0]);
        assert_eq!(href.href, "http://a.b/%7Eu#frag");
        Ok(())
    });

    it("should degrade when untrusted", || {
        let parsed = get_parsed_strict(r"\url{http://example.com/}")?;
        assert!(matches!(parsed[0], ParseNode::Color(_)));
        Ok(())
    });

    it("should parse \\href with link text", || {
        let parsed = get_parsed_trust(r"\href{http://a.b/}{xy}")?;
        assert_let!(ParseNode::Href(href) = &parsed[0]);
        assert_eq!(href.href, "http://a.b/");
        assert_eq!(href.body.len(), 2);
        Ok(())
    });
}

#[test]
fn an_html_extension_parser() {
    fn html_settings() -> Settings {
        Settings::builder()
            .trust(TrustSetting::Bool(true))
            .strict(StrictSetting::Bool(false))
            .build()
    }

    it("should attach ids and classes", || {
        let parsed = get_parsed(r"\htmlId{bar}{x}", &html_settings())?;
        assert_let!(ParseNode::Html(html) = &parsed[0]);
        assert_eq!(html.attributes.get("id").map(String::as_str), Some("bar"));

        let parsed = get_parsed(r"\htmlClass{cls}{x}", &html_settings())?;
        assert_let!(ParseNode::Html(html) = &parsed[0]);
        assert_eq!(html.attributes.get("class").map(String::as_str), Some("cls"));
        Ok(())
    });

    it("should split \\htmlData into data attributes", || {
        let parsed = get_parsed(r"\htmlData{foo=a, bar=b}{x}", &html_settings())?;
        assert_let!(ParseNode::Html(html) = &parsed[0]);
        assert_eq!(html.attributes.get("data-foo").map(String::as_str), Some("a"));
        assert_eq!(html.attributes.get("data-bar").map(String::as_str), Some("b"));
        Ok(())
    });

    it("should reject malformed \\htmlData", || {
        expect!(r"\htmlData{foo}{x}").not_to_parse(&html_settings())
    });

    it("should be rejected under strict mode", || {
        let settings = Settings::builder()
            .trust(TrustSetting::Bool(true))
            .strict(StrictSetting::Bool(true))
            .build();
        expect!(r"\htmlId{bar}{x}").not_to_parse(&settings)
    });
}

#[test]
fn a_macro_expander() {
    fn settings_with(name: &str, expansion: &str) -> Settings {
        let mut macros = MacroMap::default();
        macros.insert(
            name.to_string(),
            MacroDefinition::String(expansion.to_string()),
        );
        Settings::builder()
            .macros(macros)
            .strict(StrictSetting::Bool(true))
            .build()
    }

    it("should expand user-supplied macros", || {
        let settings = settings_with("\\foo", "x^2");
        expect!(r"\foo").to_parse_like("x^2", &settings)
    });

    it("should expand macros with parameters", || {
        let settings = settings_with("\\sq", "#1^2");
        expect!(r"\sq{y}").to_parse_like("y^2", &settings)
    });

    it("should expand \\def definitions", || {
        expect!(r"\def\x{ab}\x c").to_parse_like("abc", &strict_settings())
    });

    it("should substitute \\def parameters", || {
        expect!(r"\def\sq#1{#1^2}\sq z").to_parse_like("z^2", &strict_settings())
    });

    it("should scope \\def to the enclosing group", || {
        expect!(r"{\def\x{1}\x}\x").not_to_parse(&strict_settings())?;
        expect!(r"{\def\x{1}\x}").to_parse_like("{1}", &strict_settings())
    });

    it("should make \\gdef definitions global", || {
        expect!(r"{\gdef\x{1}}\x").to_parse_like("{}1", &strict_settings())?;
        expect!(r"{\global\def\x{1}}\x").to_parse_like("{}1", &strict_settings())
    });

    it("should expand \\edef eagerly", || {
        expect!(r"\def\a{b}\edef\x{\a}\def\a{c}\x")
            .to_parse_like("b", &strict_settings())
    });

    it("should handle \\newcommand and friends", || {
        expect!(r"\newcommand\x{y}\x").to_parse_like("y", &strict_settings())?;
        expect!(r"\newcommand\x[1]{#1#1}\x{z}").to_parse_like("zz", &strict_settings())?;
        expect!(r"\newcommand\sin{y}").not_to_parse(&strict_settings())?;
        expect!(r"\renewcommand\qux{y}").not_to_parse(&strict_settings())?;
        expect!(r"\renewcommand\sin{y}\sin").to_parse_like("y", &strict_settings())?;
        expect!(r"\providecommand\qux{y}\qux").to_parse_like("y", &strict_settings())
    });

    it("should expand builtin macros", || {
        expect!(r"\dots").to_parse_like(r"\ldots", &strict_settings())?;
        expect!(r"a \implies b").to_parse(&strict_settings())
    });

    it("should stop runaway expansion", || {
        expect!(r"\def\x{\x}\x").not_to_parse(&strict_settings())
    });

    it("should expand delimited parameters", || {
        expect!(r"\def\pair(#1,#2){[#1;#2]}\pair(a,b)")
            .to_parse_like("[a;b]", &strict_settings())
    });
}

#[test]
fn a_symbol_parser() {
    it("should resolve Unicode aliases like the command", || {
        expect!("\u{3b1}").to_parse_like(r"\alpha", &strict_settings())?;
        expect!("\u{2264}").to_parse_like(r"\leq", &strict_settings())
    });

    it("should parse spacing symbols", || {
        let parsed = get_parsed_strict(r"a\,b")?;
        assert!(matches!(parsed[1], ParseNode::Spacing(_)));
        let parsed = get_parsed_strict("a~b")?;
        assert!(matches!(parsed[1], ParseNode::Spacing(_)));
        Ok(())
    });

    it("should fold combining marks into accents", || {
        let parsed = get_parsed_strict("e\u{0301}")?;
        assert_let!(ParseNode::Accent(accent) = &parsed[0]);
        assert_eq!(accent.label, r"\acute");
        assert_eq!(accent.is_stretchy, Some(false));
        assert_eq!(accent.is_shifty, Some(true));
        assert_let!(ParseNode::MathOrd(base) = &accent.base);
        assert_eq!(base.text, "e");
        Ok(())
    });

    it("should parse like the decomposed equivalent", || {
        let settings = nonstrict_settings();
        expect!("\u{e9}").to_parse_like("e\u{0301}", &settings)
    });

    it("should substitute dotless i and j under accents", || {
        let parsed = get_parsed_strict("i\u{0307}")?;
        assert_let!(ParseNode::Accent(accent) = &parsed[0]);
        assert_let!(ParseNode::MathOrd(base) = &accent.base);
        assert_eq!(base.text, "\u{131}");
        Ok(())
    });

    it("should use text-mode accent commands in text", || {
        let parsed = get_parsed_strict("\\text{e\u{0301}}")?;
        assert_let!(ParseNode::Text(text) = &parsed[0]);
        assert_let!(ParseNode::Accent(accent) = &text.body[0]);
        assert_eq!(accent.label, r"\'");
        Ok(())
    });

    it("should gate precomposed characters in math on strictness", || {
        expect!("\u{e9}").not_to_parse(&strict_settings())?;
        expect!("\u{e9}").to_parse(&nonstrict_settings())?;
        expect!("\\text{\u{e9}}").to_parse(&strict_settings())
    });

    it("should warn about extra Latin letters in math mode", || {
        expect!("\u{e7}").not_to_parse(&strict_settings())?;
        expect!("\u{e7}").to_parse(&nonstrict_settings())?;
        expect!("\\text{\u{e7}}").to_parse(&strict_settings())
    });

    it("should render unsupported scripts as text only when lax", || {
        expect!("\u{1f600}").not_to_parse(&strict_settings())?;
        let parsed = get_parsed("\u{1f600}", &nonstrict_settings())?;
        assert_let!(ParseNode::TextOrd(ord) = &parsed[0]);
        assert_eq!(ord.mode, mathtex::types::Mode::Text);
        Ok(())
    });

    it("should parse supported foreign scripts as text", || {
        expect!("\u{0416}").to_parse(&nonstrict_settings())?;
        expect!("\\text{\u{0416}}").to_parse(&strict_settings())
    });
}

#[test]
fn an_accent_parser() {
    it("should parse math accents", || {
        let parsed = get_parsed_strict(r"\hat{x}")?;
        assert_let!(ParseNode::Accent(accent) = &parsed[0]);
        assert_eq!(accent.label, r"\hat");
        assert_eq!(accent.is_stretchy, Some(false));
        Ok(())
    });

    it("should mark wide accents stretchy", || {
        let parsed = get_parsed_strict(r"\widehat{xy}")?;
        assert_let!(ParseNode::Accent(accent) = &parsed[0]);
        assert_eq!(accent.is_stretchy, Some(true));
        Ok(())
    });

    it("should keep text accents out of strict math", || {
        expect!(r"\'{e}").not_to_parse(&strict_settings())?;
        expect!(r"\'{e}").to_parse(&nonstrict_settings())?;
        expect!(r"\text{\'{e}}").to_parse(&strict_settings())
    });
}

#[test]
fn an_hbox_parser() {
    it("should wrap its argument in text styling", || {
        let parsed = get_parsed_strict(r"\hbox{x}")?;
        assert_let!(ParseNode::Hbox(hbox) = &parsed[0]);
        assert_let!(ParseNode::Styling(styling) = &hbox.body[0]);
        assert_eq!(styling.style, StyleVariant::Text);
        Ok(())
    });
}

#[test]
fn a_styling_parser() {
    it("should apply to the trailing siblings", || {
        let parsed = get_parsed_strict(r"a \displaystyle b c")?;
        assert_eq!(parsed.len(), 2);
        assert_let!(ParseNode::Styling(styling) = &parsed[1]);
        assert_eq!(styling.style, StyleVariant::Display);
        assert_eq!(styling.body.len(), 2);
        Ok(())
    });

    it("should stop at the group end", || {
        let parsed = get_parsed_strict(r"{a \scriptstyle b} c")?;
        assert_eq!(parsed.len(), 2);
        Ok(())
    });

    it("should split at an infix operator", || {
        let parsed = get_parsed_strict(r"{a \over \displaystyle b}")?;
        assert_let!(ParseNode::OrdGroup(group) = &parsed[0]);
        assert_let!(ParseNode::Genfrac(frac) = &group.body[0]);
        assert_let!(ParseNode::OrdGroup(denom) = &frac.denom);
        assert!(matches!(denom.body[0], ParseNode::Styling(_)));
        Ok(())
    });
}

#[test]
fn an_mclass_parser() {
    it("should record the forced class", || {
        let parsed = get_parsed_strict(r"\mathbin{x}")?;
        assert_let!(ParseNode::Mclass(mclass) = &parsed[0]);
        assert_eq!(mclass.mclass, "mbin");
        assert!(mclass.is_character_box);
        Ok(())
    });
}

#[test]
fn a_relax_parser() {
    it("should leave nothing in the tree", || {
        let parsed = get_parsed_strict(r"a\relax b")?;
        assert_eq!(parsed.len(), 2);
        Ok(())
    });
}

#[test]
fn error_reporting() {
    it("should attribute errors to source positions", || {
        let err = get_parsed_strict("x^").unwrap_err();
        assert!(err.to_string().contains("Expected group after '^'"));

        let err = get_parsed_strict("ab}").unwrap_err();
        assert!(err.position.is_some());
        Ok(())
    });

    it("should report undefined control sequences by name", || {
        let err = get_parsed_strict(r"\nosuchcommand").unwrap_err();
        assert!(err.to_string().contains("Undefined control sequence"));
        assert!(err.to_string().contains("\\nosuchcommand"));
        Ok(())
    });

    it("should report unexpected end of input inside arguments", || {
        let err = get_parsed_strict(r"\textcolor{red").unwrap_err();
        assert!(err.to_string().contains("Unexpected end of input"));
        Ok(())
    });
}
