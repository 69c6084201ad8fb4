//! Renders planned members as Java-like source text.

use crate::naming::{self, escape_literal};
use crate::plan::{
    Conversion, FieldRef, InitValue, MemberBody, NestedType, PlannedItem, PlannedMember,
    Visibility,
};

const INDENT: &str = "    ";

/// Line-oriented writer that tracks brace depth.
#[derive(Debug, Default)]
pub(super) struct SourceWriter {
    out: String,
    depth: usize,
}

impl SourceWriter {
    pub(super) const fn with_depth(depth: usize) -> Self {
        Self {
            out: String::new(),
            depth,
        }
    }

    fn line(&mut self, text: impl AsRef<str>) {
        let content = text.as_ref();
        if !content.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(content);
        }
        self.out.push('\n');
    }

    fn open(&mut self, header: impl AsRef<str>) {
        self.line(format!("{} {{", header.as_ref()));
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    pub(super) fn finish(self) -> String {
        self.out
    }
}

/// Renders `items` as members of `owner`, separated by blank lines.
pub(super) fn items<'p>(
    writer: &mut SourceWriter,
    owner: &str,
    items: impl IntoIterator<Item = &'p PlannedItem>,
) {
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            writer.line("");
        }
        match item {
            PlannedItem::Member(member) => self::member(writer, owner, member),
            PlannedItem::Type(nested) => nested_type(writer, nested),
        }
    }
}

fn member(writer: &mut SourceWriter, owner: &str, member: &PlannedMember) {
    if member.overrides {
        writer.line("@Override");
    }
    let mut modifiers = String::from(match member.visibility {
        Visibility::Public => "public",
        Visibility::Private => "private",
    });
    if member.is_static {
        modifiers.push_str(" static");
    }
    let params = member
        .params
        .iter()
        .map(|p| format!("{} {}", p.declared_type, p.name))
        .collect::<Vec<_>>()
        .join(", ");
    let header = match &member.return_type {
        Some(ret) if !member.is_constructor() => {
            format!("{modifiers} {ret} {}({params})", member.name())
        }
        _ => format!("{modifiers} {owner}({params})"),
    };
    writer.open(header);
    body(writer, &member.body);
    writer.close();
}

fn nested_type(writer: &mut SourceWriter, nested: &NestedType) {
    writer.open(format!("public static class {}", nested.name));
    for field in &nested.fields {
        if field.initializer == "null" {
            writer.line(format!("private {} {};", field.declared_type, field.name));
        } else {
            writer.line(format!(
                "private {} {} = {};",
                field.declared_type, field.name, field.initializer
            ));
        }
    }
    for member in &nested.members {
        writer.line("");
        self::member(writer, &nested.name, member);
    }
    writer.close();
}

fn body(writer: &mut SourceWriter, body: &MemberBody) {
    match body {
        MemberBody::Init {
            null_checks,
            assignments,
        } => {
            for field in null_checks {
                null_check(writer, field);
            }
            for init in assignments {
                match &init.value {
                    InitValue::Param => writer.line(format!("this.{0} = {0};", init.field)),
                    InitValue::Literal(value) => {
                        writer.line(format!("this.{} = {value};", init.field));
                    }
                }
            }
        }
        MemberBody::Getter { field } => writer.line(format!("return this.{field};")),
        MemberBody::Setter { field, null_check: check } => {
            if *check {
                null_check(writer, field);
            }
            writer.line(format!("this.{field} = {field};"));
        }
        MemberBody::Equals { type_name, fields } => equals(writer, type_name, fields),
        MemberBody::HashCode { fields } => {
            let values = fields.iter().map(hashed).collect::<Vec<_>>().join(", ");
            writer.line(format!("return java.util.Objects.hash({values});"));
        }
        MemberBody::ToString { type_name, fields } => {
            writer.line(format!("return {};", to_string_expr(type_name, fields)));
        }
        MemberBody::StaticFactory {
            type_name,
            arguments,
        } => writer.line(format!("return new {type_name}({});", arguments.join(", "))),
        MemberBody::BuilderFactory { builder } => writer.line(format!("return new {builder}();")),
        MemberBody::FluentSetter { field } => {
            writer.line(format!("this.{field} = {field};"));
            writer.line("return this;");
        }
        MemberBody::Build {
            type_name,
            arguments,
        } => {
            let values = arguments
                .iter()
                .map(|a| format!("this.{a}"))
                .collect::<Vec<_>>()
                .join(", ");
            writer.line(format!("return new {type_name}({values});"));
        }
        MemberBody::Copy { type_name, fields } => {
            writer.line(format!("{type_name} copy = new {type_name}();"));
            for field in fields {
                writer.line(format!("copy.{field} = this.{field};"));
            }
            writer.line("return copy;");
        }
        MemberBody::Convert {
            field,
            target,
            conversion,
        } => match conversion {
            Conversion::Text => writer.line(format!("return String.valueOf(this.{field});")),
            Conversion::Numeric => writer.line(format!("return ({target}) this.{field};")),
        },
    }
}

fn null_check(writer: &mut SourceWriter, field: &str) {
    writer.open(format!("if ({field} == null)"));
    writer.line(format!(
        "throw new NullPointerException(\"{}\");",
        escape_literal(&format!("{field} is marked non-null but is null"))
    ));
    writer.close();
}

fn equals(writer: &mut SourceWriter, type_name: &str, fields: &[FieldRef]) {
    writer.open("if (o == this)");
    writer.line("return true;");
    writer.close();
    writer.open(format!("if (!(o instanceof {type_name}))"));
    writer.line("return false;");
    writer.close();
    if fields.is_empty() {
        writer.line("return true;");
        return;
    }
    writer.line(format!("{type_name} other = ({type_name}) o;"));
    let conditions = fields.iter().map(compared).collect::<Vec<_>>().join(" && ");
    writer.line(format!("return {conditions};"));
}

fn is_array(declared_type: &str) -> bool {
    let ty = declared_type.trim_end();
    ty.ends_with("[]") || ty.ends_with("...")
}

fn compared(field: &FieldRef) -> String {
    let name = &field.name;
    match field.declared_type.trim() {
        "float" => format!("Float.compare(this.{name}, other.{name}) == 0"),
        "double" => format!("Double.compare(this.{name}, other.{name}) == 0"),
        ty if naming::is_primitive_like(ty) => format!("this.{name} == other.{name}"),
        ty if is_array(ty) => format!("java.util.Arrays.equals(this.{name}, other.{name})"),
        _ => format!("java.util.Objects.equals(this.{name}, other.{name})"),
    }
}

fn hashed(field: &FieldRef) -> String {
    if is_array(&field.declared_type) {
        format!("java.util.Arrays.hashCode(this.{})", field.name)
    } else {
        format!("this.{}", field.name)
    }
}

fn to_string_expr(type_name: &str, fields: &[FieldRef]) -> String {
    let mut parts = Vec::with_capacity(fields.len() * 2 + 1);
    let mut literal = format!("{type_name}(");
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            literal.push_str(", ");
        }
        literal.push_str(&field.name);
        literal.push('=');
        parts.push(format!("\"{}\"", escape_literal(&literal)));
        literal.clear();
        parts.push(if is_array(&field.declared_type) {
            format!("java.util.Arrays.toString(this.{})", field.name)
        } else {
            format!("this.{}", field.name)
        });
    }
    literal.push(')');
    parts.push(format!("\"{}\"", escape_literal(&literal)));
    parts.join(" + ")
}
