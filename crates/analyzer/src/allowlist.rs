//! Names that are acceptable as bare-identifier annotations.
//!
//! The set covers every Python builtin name plus the standard `typing`
//! vocabulary. Capitalized identifiers are accepted by the validator
//! without consulting this set, so the entries that matter most are the
//! lowercase builtins (`int`, `list`, `str`, ...) that a typo would miss.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Python builtin names (the lowercase portion of `dir(builtins)`).
const BUILTIN_NAMES: &[&str] = &[
    "abs",
    "aiter",
    "all",
    "anext",
    "any",
    "ascii",
    "bin",
    "bool",
    "breakpoint",
    "bytearray",
    "bytes",
    "callable",
    "chr",
    "classmethod",
    "compile",
    "complex",
    "copyright",
    "credits",
    "delattr",
    "dict",
    "dir",
    "divmod",
    "enumerate",
    "eval",
    "exec",
    "exit",
    "filter",
    "float",
    "format",
    "frozenset",
    "getattr",
    "globals",
    "hasattr",
    "hash",
    "help",
    "hex",
    "id",
    "input",
    "int",
    "isinstance",
    "issubclass",
    "iter",
    "len",
    "license",
    "list",
    "locals",
    "map",
    "max",
    "memoryview",
    "min",
    "next",
    "object",
    "oct",
    "open",
    "ord",
    "pow",
    "print",
    "property",
    "quit",
    "range",
    "repr",
    "reversed",
    "round",
    "set",
    "setattr",
    "slice",
    "sorted",
    "staticmethod",
    "str",
    "sum",
    "super",
    "tuple",
    "type",
    "vars",
    "zip",
    "None",
    "__import__",
];

/// Common typing-module constructs. Most are capitalized and would pass
/// the capitalization rule anyway; listed explicitly so the allow-list is
/// complete on its own.
const TYPING_NAMES: &[&str] = &[
    "Any",
    "Optional",
    "Union",
    "List",
    "Dict",
    "Tuple",
    "Set",
    "FrozenSet",
    "Type",
    "Callable",
    "Iterator",
    "Generator",
    "Sequence",
    "Mapping",
    "Iterable",
    "Awaitable",
    "Coroutine",
    "ClassVar",
    "Final",
    "Literal",
    "TypeVar",
    "Protocol",
    "TypedDict",
    "NamedTuple",
    "NoReturn",
    "Never",
    "Self",
    "TypeAlias",
    "TypeGuard",
    "ParamSpec",
    "Concatenate",
];

/// Full allow-list of known type names
pub static KNOWN_TYPE_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    BUILTIN_NAMES
        .iter()
        .chain(TYPING_NAMES.iter())
        .copied()
        .collect()
});
