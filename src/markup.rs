//! Markup collaborator: a minimal element model and a pretty printer.
//!
//! The document builder converts its committed tree into [`Element`]s and
//! delegates text generation and escaping to a [`Formatter`].

mod formatter;
mod model;

pub use self::{
    formatter::{strip_declaration, FormatConfig, Formatter, XmlFormatter},
    model::Element,
};
