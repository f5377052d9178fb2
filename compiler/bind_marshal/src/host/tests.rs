use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::StdFixture;

use GeneratorTarget::{Managed, NativeAdjacent};

#[test]
fn fixed_host_types() {
    assert_eq!(HostType::Text.render(NativeAdjacent), "System::String^");
    assert_eq!(HostType::Text.render(Managed), "string");
    assert_eq!(HostType::IntPtr.render(NativeAdjacent), "System::IntPtr");
    assert_eq!(HostType::IntPtr.render(Managed), "global::System.IntPtr");
    assert_eq!(HostType::TextWriter.render(NativeAdjacent), "System::IO::TextWriter^");
    assert_eq!(HostType::TextWriter.render(Managed), "global::System.IO.TextWriter");
}

#[test]
fn include_directives() {
    assert_eq!(Include::angled("cstddef").to_string(), "#include <cstddef>");
    assert_eq!(Include::quoted("widgets.h").to_string(), "#include \"widgets.h\"");
}

#[test]
fn primitives_per_surface() {
    let ast = Ast::new();
    let cli = HostTypePrinter::new(&ast, NativeAdjacent);
    let cs = HostTypePrinter::new(&ast, Managed);
    let ty = TypeId::of;
    assert_eq!(cli.print(ty(Primitive::Int)), "int");
    assert_eq!(cli.print(ty(Primitive::WChar)), "System::Char");
    assert_eq!(cs.print(ty(Primitive::Char)), "sbyte");
    assert_eq!(cs.print(ty(Primitive::WChar)), "char");
    assert_eq!(cs.print(ty(Primitive::ULongLong)), "ulong");
    assert_eq!(cs.print(ty(Primitive::Long)), "int");
}

#[test]
fn records_and_specializations() {
    let mut fx = StdFixture::new();
    let spec = fx.allocator_of(Primitive::Char);
    let boxed = fx.box_of(fx.widget);
    let cli = HostTypePrinter::new(&fx.ast, NativeAdjacent);
    let cs = HostTypePrinter::new(&fx.ast, Managed);

    assert_eq!(cli.print(fx.widget), "app::Widget^");
    assert_eq!(cs.print(fx.widget), "global::app.Widget");
    assert_eq!(cs.print_decl(spec), "global::std.allocator<sbyte>");
    assert_eq!(cs.print(boxed), "global::app.Box<global::app.Widget>");
    assert_eq!(cli.print(boxed), "app::Box<app::Widget^>^");
}

#[test]
fn pointers_and_arrays() {
    let mut fx = StdFixture::new();
    let int = fx.int();
    let int_ptr = fx.ast.pointer(int);
    let widget_ptr = fx.ast.pointer(fx.widget);
    let ints = fx.ast.array(int, None);
    let cli = HostTypePrinter::new(&fx.ast, NativeAdjacent);
    let cs = HostTypePrinter::new(&fx.ast, Managed);

    assert_eq!(cs.print(int_ptr), "global::System.IntPtr");
    assert_eq!(cli.print(widget_ptr), "app::Widget^");
    assert_eq!(cs.print(ints), "int[]");
    assert_eq!(cli.print(ints), "array<int>^");
}
