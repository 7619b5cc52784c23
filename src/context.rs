//! The registry the parser consults: function table plus symbol tables.

use crate::namespace::KeyMap;

use crate::{
    define_function::{FunctionDefSpec, FunctionSpec},
    functions,
    symbols::{Symbols, create_symbols},
};

/// Read-only lookup tables shared by every parse.
///
/// Built once (typically via `MathContext::default()`) and borrowed by each
/// [`crate::parser::Parser`]. Registration happens through
/// [`MathContext::define_function`]; after construction the tables are never
/// mutated.
pub struct MathContext {
    /// All registered functions, keyed by command name.
    pub functions: KeyMap<String, FunctionSpec>,
    /// Symbol tables for both modes.
    pub symbols: Symbols,
}

impl MathContext {
    /// Registers one function spec under each of its names.
    pub fn define_function(&mut self, spec: FunctionDefSpec) {
        let data = FunctionSpec {
            num_args: spec.props.num_args,
            num_optional_args: spec.props.num_optional_args,
            arg_types: spec.props.arg_types,
            greediness: spec.props.greediness,
            allowed_in_text: spec.props.allowed_in_text,
            allowed_in_math: spec.props.allowed_in_math,
            infix: spec.props.infix,
            handler: spec.handler,
        };

        for name in spec.names {
            self.functions.insert((*name).to_owned(), data.clone());
        }
    }
}

impl Default for MathContext {
    fn default() -> Self {
        let mut ctx = Self {
            functions: KeyMap::default(),
            symbols: create_symbols(),
        };

        functions::accent::define_accent(&mut ctx);
        functions::color::define_color(&mut ctx);
        functions::def::define_def(&mut ctx);
        functions::genfrac::define_genfrac(&mut ctx);
        functions::hbox::define_hbox(&mut ctx);
        functions::href::define_href(&mut ctx);
        functions::html::define_html(&mut ctx);
        functions::kern::define_kern(&mut ctx);
        functions::leftright::define_leftright(&mut ctx);
        functions::mclass::define_mclass(&mut ctx);
        functions::op::define_op(&mut ctx);
        functions::operatorname::define_operatorname(&mut ctx);
        functions::relax::define_relax(&mut ctx);
        functions::rule::define_rule(&mut ctx);
        functions::sqrt::define_sqrt(&mut ctx);
        functions::styling::define_styling(&mut ctx);
        functions::text::define_text(&mut ctx);
        functions::verb::define_verb(&mut ctx);

        ctx
    }
}
