//! Structure types a node can be classified as.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A PDF structure type recovered for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    Document,
    Part,
    Art,
    Sect,
    Div,
    BlockQuote,
    Caption,
    Toc,
    Toci,
    Index,
    NonStruct,
    Private,
    Paragraph,
    Heading,
    NumberedHeading(u8),
    List,
    ListItem,
    ListLabel,
    ListBody,
    Table,
    TableRow,
    TableHeader,
    TableCell,
    TableHead,
    TableBody,
    TableFoot,
    Span,
    Quote,
    Note,
    Reference,
    BibEntry,
    Code,
    Link,
    Annotation,
    Ruby,
    Warichu,
    Figure,
    Formula,
    Form,
}

impl SemanticType {
    /// Structure tag as written in tagged PDF.
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Document => "Document",
            SemanticType::Part => "Part",
            SemanticType::Art => "Art",
            SemanticType::Sect => "Sect",
            SemanticType::Div => "Div",
            SemanticType::BlockQuote => "BlockQuote",
            SemanticType::Caption => "Caption",
            SemanticType::Toc => "TOC",
            SemanticType::Toci => "TOCI",
            SemanticType::Index => "Index",
            SemanticType::NonStruct => "NonStruct",
            SemanticType::Private => "Private",
            SemanticType::Paragraph => "P",
            SemanticType::Heading => "H",
            SemanticType::NumberedHeading(1) => "H1",
            SemanticType::NumberedHeading(2) => "H2",
            SemanticType::NumberedHeading(3) => "H3",
            SemanticType::NumberedHeading(4) => "H4",
            SemanticType::NumberedHeading(5) => "H5",
            SemanticType::NumberedHeading(6) => "H6",
            // Levels outside 1..=6 have no standard tag
            SemanticType::NumberedHeading(_) => "H",
            SemanticType::List => "L",
            SemanticType::ListItem => "LI",
            SemanticType::ListLabel => "Lbl",
            SemanticType::ListBody => "LBody",
            SemanticType::Table => "Table",
            SemanticType::TableRow => "TR",
            SemanticType::TableHeader => "TH",
            SemanticType::TableCell => "TD",
            SemanticType::TableHead => "THead",
            SemanticType::TableBody => "TBody",
            SemanticType::TableFoot => "TFoot",
            SemanticType::Span => "Span",
            SemanticType::Quote => "Quote",
            SemanticType::Note => "Note",
            SemanticType::Reference => "Reference",
            SemanticType::BibEntry => "BibEntry",
            SemanticType::Code => "Code",
            SemanticType::Link => "Link",
            SemanticType::Annotation => "Annot",
            SemanticType::Ruby => "Ruby",
            SemanticType::Warichu => "Warichu",
            SemanticType::Figure => "Figure",
            SemanticType::Formula => "Formula",
            SemanticType::Form => "Form",
        }
    }

    /// Look up a structure tag, returning `None` for unknown tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let ty = match tag {
            "Document" => SemanticType::Document,
            "Part" => SemanticType::Part,
            "Art" => SemanticType::Art,
            "Sect" => SemanticType::Sect,
            "Div" => SemanticType::Div,
            "BlockQuote" => SemanticType::BlockQuote,
            "Caption" => SemanticType::Caption,
            "TOC" => SemanticType::Toc,
            "TOCI" => SemanticType::Toci,
            "Index" => SemanticType::Index,
            "NonStruct" => SemanticType::NonStruct,
            "Private" => SemanticType::Private,
            "P" => SemanticType::Paragraph,
            "H" => SemanticType::Heading,
            "H1" => SemanticType::NumberedHeading(1),
            "H2" => SemanticType::NumberedHeading(2),
            "H3" => SemanticType::NumberedHeading(3),
            "H4" => SemanticType::NumberedHeading(4),
            "H5" => SemanticType::NumberedHeading(5),
            "H6" => SemanticType::NumberedHeading(6),
            "L" => SemanticType::List,
            "LI" => SemanticType::ListItem,
            "Lbl" => SemanticType::ListLabel,
            "LBody" => SemanticType::ListBody,
            "Table" => SemanticType::Table,
            "TR" => SemanticType::TableRow,
            "TH" => SemanticType::TableHeader,
            "TD" => SemanticType::TableCell,
            "THead" => SemanticType::TableHead,
            "TBody" => SemanticType::TableBody,
            "TFoot" => SemanticType::TableFoot,
            "Span" => SemanticType::Span,
            "Quote" => SemanticType::Quote,
            "Note" => SemanticType::Note,
            "Reference" => SemanticType::Reference,
            "BibEntry" => SemanticType::BibEntry,
            "Code" => SemanticType::Code,
            "Link" => SemanticType::Link,
            "Annot" => SemanticType::Annotation,
            "Ruby" => SemanticType::Ruby,
            "Warichu" => SemanticType::Warichu,
            "Figure" => SemanticType::Figure,
            "Formula" => SemanticType::Formula,
            "Form" => SemanticType::Form,
            _ => return None,
        };
        Some(ty)
    }

    /// Check if this type groups other block-level content.
    pub fn is_grouping(&self) -> bool {
        matches!(
            self,
            SemanticType::Document
                | SemanticType::Part
                | SemanticType::Art
                | SemanticType::Sect
                | SemanticType::Div
                | SemanticType::NonStruct
        )
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemanticType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| Error::Other(format!("Unknown structure type: {}", s)))
    }
}
