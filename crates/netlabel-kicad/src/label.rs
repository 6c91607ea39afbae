//! Net labels created by this crate and their KiCad S-expression form.

use netlabel_core::{LabelCollection, LabelScope, NetLabel, Position};
use netlabel_sexpr::Sexpr;
use uuid::Uuid;

/// Default KiCad text size in millimeters.
const FONT_SIZE: f64 = 1.27;

/// First schematic format version that spells flags as `(flag yes)`.
pub const BOOLEAN_FLAGS_SINCE: u32 = 20231120;

/// How flags such as `hide` are written, which depends on the file version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagStyle {
    /// KiCad 7 and older: `(fields_autoplaced)` and a bare `hide`
    Bare,
    /// KiCad 8: `(fields_autoplaced yes)` and `(hide yes)`
    #[default]
    Boolean,
}

impl FlagStyle {
    /// Style for a `(version N)` value. Unknown versions get the current style.
    pub fn for_version(version: Option<u32>) -> Self {
        match version {
            Some(version) if version < BOOLEAN_FLAGS_SINCE => FlagStyle::Bare,
            _ => FlagStyle::Boolean,
        }
    }

    fn fields_autoplaced(self) -> Sexpr {
        match self {
            FlagStyle::Bare => Sexpr::List(vec![Sexpr::symbol("fields_autoplaced")]),
            FlagStyle::Boolean => Sexpr::node("fields_autoplaced", [Sexpr::symbol("yes")]),
        }
    }

    fn hide(self) -> Sexpr {
        match self {
            FlagStyle::Bare => Sexpr::symbol("hide"),
            FlagStyle::Boolean => Sexpr::node("hide", [Sexpr::symbol("yes")]),
        }
    }
}

/// A label that will be written into the schematic on persist.
#[derive(Debug, Clone, PartialEq)]
pub struct KicadLabel {
    pub scope: LabelScope,
    pub text: String,
    pub position: Position,
    pub uuid: String,
}

impl KicadLabel {
    fn new(scope: LabelScope) -> Self {
        Self {
            scope,
            text: String::new(),
            position: Position::new(0.0, 0.0),
            uuid: Uuid::new_v4().to_string(),
        }
    }

    /// KiCad node keyword for this label's scope.
    pub fn keyword(&self) -> &'static str {
        match self.scope {
            LabelScope::Local => "label",
            LabelScope::Global => "global_label",
        }
    }

    pub fn to_sexpr(&self, style: FlagStyle) -> Sexpr {
        let at = at(self.position);
        match self.scope {
            LabelScope::Local => Sexpr::node(
                self.keyword(),
                [
                    Sexpr::string(self.text.clone()),
                    at,
                    style.fields_autoplaced(),
                    effects(&["left", "bottom"], None),
                    Sexpr::node("uuid", [Sexpr::string(self.uuid.clone())]),
                ],
            ),
            LabelScope::Global => Sexpr::node(
                self.keyword(),
                [
                    Sexpr::string(self.text.clone()),
                    Sexpr::node("shape", [Sexpr::symbol("input")]),
                    at.clone(),
                    style.fields_autoplaced(),
                    effects(&["left"], None),
                    Sexpr::node("uuid", [Sexpr::string(self.uuid.clone())]),
                    Sexpr::node(
                        "property",
                        [
                            Sexpr::string("Intersheetrefs"),
                            Sexpr::string("${INTERSHEET_REFS}"),
                            at,
                            effects(&["left"], Some(style)),
                        ],
                    ),
                ],
            ),
        }
    }
}

impl NetLabel for KicadLabel {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

fn at(position: Position) -> Sexpr {
    Sexpr::node(
        "at",
        [
            Sexpr::number(position.x),
            Sexpr::number(position.y),
            Sexpr::number(0.0),
        ],
    )
}

/// `hidden` carries the flag style when the text is hidden.
fn effects(justify: &[&str], hidden: Option<FlagStyle>) -> Sexpr {
    let mut items = vec![
        Sexpr::node(
            "font",
            [Sexpr::node(
                "size",
                [Sexpr::number(FONT_SIZE), Sexpr::number(FONT_SIZE)],
            )],
        ),
        Sexpr::node("justify", justify.iter().map(|j| Sexpr::symbol(*j))),
    ];
    if let Some(style) = hidden {
        items.push(style.hide());
    }
    Sexpr::node("effects", items)
}

/// Labels of one scope added during this session.
#[derive(Debug, Clone)]
pub struct LabelSet {
    scope: LabelScope,
    labels: Vec<KicadLabel>,
}

impl LabelSet {
    pub(crate) fn new(scope: LabelScope) -> Self {
        Self {
            scope,
            labels: Vec::new(),
        }
    }

    pub fn labels(&self) -> &[KicadLabel] {
        &self.labels
    }
}

impl LabelCollection for LabelSet {
    fn new_label(&mut self) -> &mut dyn NetLabel {
        self.labels.push(KicadLabel::new(self.scope));
        let index = self.labels.len() - 1;
        &mut self.labels[index]
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}
