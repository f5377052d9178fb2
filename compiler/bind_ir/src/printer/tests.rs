use pretty_assertions::assert_eq;

use super::*;
use crate::Primitive;

struct Std {
    ast: Ast,
    std_ns: DeclId,
    basic_string: DeclId,
    char_traits: DeclId,
    allocator: DeclId,
}

fn std_string() -> Std {
    let mut ast = Ast::new();
    let tu = ast.translation_unit("string", true);
    let std_ns = ast.namespace(tu, "std");
    let v1 = ast.inline_namespace(std_ns, "__1");
    let basic_string = ast.class_template(v1, "basic_string");
    let char_traits = ast.class_template(v1, "char_traits");
    let allocator = ast.class_template(v1, "allocator");
    Std {
        ast,
        std_ns,
        basic_string,
        char_traits,
        allocator,
    }
}

fn string_type(s: &mut Std) -> TypeId {
    let ch = TypeId::of(Primitive::Char);
    let traits = s.ast.instantiate(s.char_traits, &[ch]);
    let alloc = s.ast.instantiate(s.allocator, &[ch]);
    s.ast.instantiate(s.basic_string, &[ch, traits, alloc])
}

#[test]
fn unqualified_full_signature() {
    let mut s = std_string();
    let string = string_type(&mut s);
    assert_eq!(
        NativeTypePrinter::unqualified().print(&s.ast, string),
        "basic_string<char, char_traits<char>, allocator<char>>"
    );
}

#[test]
fn qualified_elides_inline_namespaces() {
    let mut s = std_string();
    let string = string_type(&mut s);
    assert_eq!(
        NativeTypePrinter::qualified().print(&s.ast, string),
        "std::basic_string<char, std::char_traits<char>, std::allocator<char>>"
    );
    assert_eq!(
        NativeTypePrinter::qualified().decl_name(&s.ast, s.basic_string),
        "std::basic_string"
    );
}

#[test]
fn typedef_prints_its_own_name() {
    let mut s = std_string();
    let string = string_type(&mut s);
    let alias = s.ast.typedef(s.std_ns, "string", string);
    assert_eq!(NativeTypePrinter::qualified().print(&s.ast, alias), "std::string");
    assert_eq!(NativeTypePrinter::unqualified().print(&s.ast, alias), "string");
}

#[test]
fn modifiers() {
    let mut ast = Ast::new();
    let int = TypeId::of(Primitive::Int);
    let cptr = ast.const_pointer(TypeId::of(Primitive::Char));
    let ref_int = ast.reference(int);
    let array = ast.array(int, Some(4));
    let open = ast.array(int, None);
    let p = NativeTypePrinter::default();

    assert_eq!(p.print(&ast, cptr), "const char*");
    assert_eq!(p.print(&ast, ref_int), "int&");
    assert_eq!(p.print(&ast, array), "int[4]");
    assert_eq!(p.print(&ast, open), "int[]");
}

#[test]
fn specialization_decl_prints_arguments() {
    let mut s = std_string();
    let spec = s.ast.specialization(s.allocator, &[TypeId::of(Primitive::WChar)]);
    assert_eq!(
        NativeTypePrinter::qualified().print_decl(&s.ast, spec),
        "std::allocator<wchar_t>"
    );
    let tag = s.ast.tag(spec);
    assert_eq!(NativeTypePrinter::unqualified().print(&s.ast, tag), "allocator<wchar_t>");
}
