//! A small standard library modelled after libc++, for unit tests.
//!
//! Templates live in the inline namespace `std::__1` of a system header;
//! user declarations live in namespace `app` of a user header.

use bind_ir::{Ast, DeclId, Primitive, TypeId};

use crate::{builtin_registry, GenerationContext, MarshalOptions};

pub(crate) struct StdFixture {
    pub ast: Ast,
    pub std_ns: DeclId,
    pub inline_ns: DeclId,
    pub char_traits: DeclId,
    pub allocator: DeclId,
    pub basic_string: DeclId,
    pub vector: DeclId,
    pub map: DeclId,
    pub list: DeclId,
    pub shared_ptr: DeclId,
    pub user_box: DeclId,
    /// `std::string`
    pub string: TypeId,
    /// `std::wstring`
    pub wstring: TypeId,
    /// `std::ostream`
    pub ostream: TypeId,
    /// `std::nullptr_t`
    pub nullptr_t: TypeId,
    /// `FILE`
    pub file: TypeId,
    /// `va_list`
    pub va_list: TypeId,
    /// `app::Widget`
    pub widget: TypeId,
    /// `app::Secret`, marked ignored.
    pub secret: TypeId,
}

impl StdFixture {
    pub(crate) fn new() -> Self {
        Self::build(true)
    }

    /// Same library, but `basic_string` declares no `c_str`.
    pub(crate) fn without_c_str() -> Self {
        Self::build(false)
    }

    fn build(with_c_str: bool) -> Self {
        let mut ast = Ast::new();
        let system = ast.translation_unit("c++/v1/string", true);
        let std_ns = ast.namespace(system, "std");
        let inline_ns = ast.inline_namespace(std_ns, "__1");
        let char_traits = ast.class_template(inline_ns, "char_traits");
        let allocator = ast.class_template(inline_ns, "allocator");
        let basic_string = ast.class_template(inline_ns, "basic_string");
        if with_c_str {
            ast.method(basic_string, "c_str");
        }
        let vector = ast.class_template(inline_ns, "vector");
        let map = ast.class_template(inline_ns, "map");
        let list = ast.class_template(inline_ns, "list");
        let shared_ptr = ast.class_template(inline_ns, "shared_ptr");
        let basic_ostream = ast.class_template(inline_ns, "basic_ostream");

        let char_ty = ast.primitive(Primitive::Char);
        let traits_char = ast.instantiate(char_traits, &[char_ty]);
        let ostream_inst = ast.instantiate(basic_ostream, &[char_ty, traits_char]);
        let ostream = ast.typedef(inline_ns, "ostream", ostream_inst);
        let nullptr_ty = ast.primitive(Primitive::NullPtr);
        let nullptr_t = ast.typedef(std_ns, "nullptr_t", nullptr_ty);
        let io_file = ast.class(system, "_IO_FILE");
        let io_file_ty = ast.tag(io_file);
        let file = ast.typedef(system, "FILE", io_file_ty);
        let char_ptr = ast.pointer(char_ty);
        let va_list = ast.typedef(system, "va_list", char_ptr);

        let user = ast.translation_unit("widgets.h", false);
        let app_ns = ast.namespace(user, "app");
        let widget_decl = ast.class(app_ns, "Widget");
        let widget = ast.tag(widget_decl);
        let secret_decl = ast.class(app_ns, "Secret");
        ast.mark_ignored(secret_decl);
        let secret = ast.tag(secret_decl);
        let user_box = ast.class_template(app_ns, "Box");

        let mut fx = Self {
            ast,
            std_ns,
            inline_ns,
            char_traits,
            allocator,
            basic_string,
            vector,
            map,
            list,
            shared_ptr,
            user_box,
            string: TypeId::of(Primitive::Void),
            wstring: TypeId::of(Primitive::Void),
            ostream,
            nullptr_t,
            file,
            va_list,
            widget,
            secret,
        };
        let narrow = fx.basic_string_of(Primitive::Char);
        fx.string = fx.ast.typedef(inline_ns, "string", narrow);
        let wide = fx.basic_string_of(Primitive::WChar);
        fx.wstring = fx.ast.typedef(inline_ns, "wstring", wide);
        fx
    }

    /// `basic_string<C, char_traits<C>, allocator<C>>`
    pub(crate) fn basic_string_of(&mut self, c: Primitive) -> TypeId {
        let c = self.ast.primitive(c);
        let traits = self.ast.instantiate(self.char_traits, &[c]);
        let alloc = self.ast.instantiate(self.allocator, &[c]);
        self.ast.instantiate(self.basic_string, &[c, traits, alloc])
    }

    /// The `allocator<C>` specialization declaration.
    pub(crate) fn allocator_of(&mut self, c: Primitive) -> DeclId {
        let c = self.ast.primitive(c);
        self.ast.specialization(self.allocator, &[c])
    }

    pub(crate) fn vector_of(&mut self, element: TypeId) -> TypeId {
        self.ast.instantiate(self.vector, &[element])
    }

    pub(crate) fn map_of(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.ast.instantiate(self.map, &[key, value])
    }

    pub(crate) fn list_of(&mut self, element: TypeId) -> TypeId {
        self.ast.instantiate(self.list, &[element])
    }

    pub(crate) fn shared_ptr_of(&mut self, element: TypeId) -> TypeId {
        self.ast.instantiate(self.shared_ptr, &[element])
    }

    /// User template `app::Box<T>`.
    pub(crate) fn box_of(&mut self, element: TypeId) -> TypeId {
        self.ast.instantiate(self.user_box, &[element])
    }

    pub(crate) fn int(&self) -> TypeId {
        self.ast.primitive(Primitive::Int)
    }

    /// Generation context over the built-in registry.
    pub(crate) fn gen<'a>(&'a self, options: &'a MarshalOptions) -> GenerationContext<'a> {
        GenerationContext::new(&self.ast, builtin_registry(), options)
    }
}
