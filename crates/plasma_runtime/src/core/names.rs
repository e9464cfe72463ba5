//! Names of built-in types, methods and bindings.

// Types
pub const OBJECT: &str = "Object";
pub const TYPE: &str = "Type";
pub const FUNCTION: &str = "Function";
pub const CALLABLE: &str = "Callable";
pub const STRING: &str = "String";
pub const BOOL: &str = "Bool";
pub const TUPLE: &str = "Tuple";
pub const INTEGER: &str = "Integer";
pub const FLOAT: &str = "Float";
pub const ARRAY: &str = "Array";
pub const NONE_TYPE: &str = "NoneType";
pub const BYTES: &str = "Bytes";
pub const HASH_TABLE: &str = "HashTable";
pub const ITERATOR: &str = "Iterator";
pub const MODULE: &str = "Module";

// Errors
pub const RUNTIME_ERROR: &str = "RuntimeError";
pub const INVALID_TYPE_ERROR: &str = "InvalidTypeError";
pub const OBJECT_WITH_NAME_NOT_FOUND_ERROR: &str = "ObjectWithNameNotFoundError";
pub const INDEX_OUT_OF_RANGE_ERROR: &str = "IndexOutOfRangeError";
pub const KEY_NOT_FOUND_ERROR: &str = "KeyNotFoundError";
pub const UNHASHABLE_TYPE_ERROR: &str = "UnhashableTypeError";
pub const INVALID_NUMBER_OF_ARGUMENTS_ERROR: &str = "InvalidNumberOfArgumentsError";
pub const NOT_IMPLEMENTED_CALLABLE_ERROR: &str = "NotImplementedCallableError";
pub const OBJECT_CONSTRUCTION_ERROR: &str = "ObjectConstructionError";
pub const OBJECT_NOT_CALLABLE_ERROR: &str = "ObjectNotCallableError";
pub const BUILT_IN_SYMBOL_PROTECTION_ERROR: &str = "BuiltInSymbolProtectionError";
pub const INTEGER_PARSING_ERROR: &str = "IntegerParsingError";
pub const FLOAT_PARSING_ERROR: &str = "FloatParsingError";
pub const DIVISION_BY_ZERO_ERROR: &str = "DivisionByZeroError";

/// Every error type except the `RuntimeError` base.
pub const ERROR_TYPES: [&str; 13] = [
    INVALID_TYPE_ERROR,
    OBJECT_WITH_NAME_NOT_FOUND_ERROR,
    INDEX_OUT_OF_RANGE_ERROR,
    KEY_NOT_FOUND_ERROR,
    UNHASHABLE_TYPE_ERROR,
    INVALID_NUMBER_OF_ARGUMENTS_ERROR,
    NOT_IMPLEMENTED_CALLABLE_ERROR,
    OBJECT_CONSTRUCTION_ERROR,
    OBJECT_NOT_CALLABLE_ERROR,
    BUILT_IN_SYMBOL_PROTECTION_ERROR,
    INTEGER_PARSING_ERROR,
    FLOAT_PARSING_ERROR,
    DIVISION_BY_ZERO_ERROR,
];

// Singletons and special bindings
pub const TRUE: &str = "True";
pub const FALSE: &str = "False";
pub const NONE: &str = "None";
pub const SELF: &str = "self";

// Construction
pub const INITIALIZE: &str = "Initialize";

// Unary operators
pub const NEG_BITS: &str = "NegBits";
pub const NEGATE: &str = "Negate";
pub const NEGATIVE: &str = "Negative";

// Binary operators
pub const ADD: &str = "Add";
pub const RIGHT_ADD: &str = "RightAdd";
pub const SUB: &str = "Sub";
pub const RIGHT_SUB: &str = "RightSub";
pub const MUL: &str = "Mul";
pub const RIGHT_MUL: &str = "RightMul";
pub const DIV: &str = "Div";
pub const RIGHT_DIV: &str = "RightDiv";
pub const FLOOR_DIV: &str = "FloorDiv";
pub const RIGHT_FLOOR_DIV: &str = "RightFloorDiv";
pub const MOD: &str = "Mod";
pub const RIGHT_MOD: &str = "RightMod";
pub const POW: &str = "Pow";
pub const RIGHT_POW: &str = "RightPow";
pub const BIT_XOR: &str = "BitXor";
pub const RIGHT_BIT_XOR: &str = "RightBitXor";
pub const BIT_AND: &str = "BitAnd";
pub const RIGHT_BIT_AND: &str = "RightBitAnd";
pub const BIT_OR: &str = "BitOr";
pub const RIGHT_BIT_OR: &str = "RightBitOr";
pub const BIT_LEFT: &str = "BitLeft";
pub const RIGHT_BIT_LEFT: &str = "RightBitLeft";
pub const BIT_RIGHT: &str = "BitRight";
pub const RIGHT_BIT_RIGHT: &str = "RightBitRight";
pub const AND: &str = "And";
pub const RIGHT_AND: &str = "RightAnd";
pub const OR: &str = "Or";
pub const RIGHT_OR: &str = "RightOr";
pub const XOR: &str = "Xor";
pub const RIGHT_XOR: &str = "RightXor";
pub const EQUALS: &str = "Equals";
pub const RIGHT_EQUALS: &str = "RightEquals";
pub const NOT_EQUALS: &str = "NotEquals";
pub const RIGHT_NOT_EQUALS: &str = "RightNotEquals";
pub const GREATER_THAN: &str = "GreaterThan";
pub const RIGHT_GREATER_THAN: &str = "RightGreaterThan";
pub const LESS_THAN: &str = "LessThan";
pub const RIGHT_LESS_THAN: &str = "RightLessThan";
pub const GREATER_THAN_OR_EQUAL: &str = "GreaterThanOrEqual";
pub const RIGHT_GREATER_THAN_OR_EQUAL: &str = "RightGreaterThanOrEqual";
pub const LESS_THAN_OR_EQUAL: &str = "LessThanOrEqual";
pub const RIGHT_LESS_THAN_OR_EQUAL: &str = "RightLessThanOrEqual";
pub const CONTAINS: &str = "Contains";
pub const RIGHT_CONTAINS: &str = "RightContains";

// Behaviour
pub const HASH: &str = "Hash";
pub const COPY: &str = "Copy";
pub const INDEX: &str = "Index";
pub const ASSIGN: &str = "Assign";
pub const CALL: &str = "Call";
pub const ITER: &str = "Iter";
pub const HAS_NEXT: &str = "HasNext";
pub const NEXT: &str = "Next";
pub const CLASS: &str = "Class";
pub const SUB_CLASSES: &str = "SubClasses";
pub const LENGTH: &str = "Length";

// Conversions
pub const TO_INTEGER: &str = "ToInteger";
pub const TO_FLOAT: &str = "ToFloat";
pub const TO_STRING: &str = "ToString";
pub const TO_BOOL: &str = "ToBool";
pub const TO_ARRAY: &str = "ToArray";
pub const TO_TUPLE: &str = "ToTuple";

// Payload access
pub const GET_INTEGER: &str = "GetInteger";
pub const GET_FLOAT: &str = "GetFloat";
pub const GET_STRING: &str = "GetString";
pub const GET_BOOL: &str = "GetBool";
pub const GET_BYTES: &str = "GetBytes";
pub const GET_CONTENT: &str = "GetContent";
pub const GET_KEY_VALUES: &str = "GetKeyValues";
pub const SET_INTEGER: &str = "SetInteger";
pub const SET_FLOAT: &str = "SetFloat";
pub const SET_STRING: &str = "SetString";
pub const SET_BOOL: &str = "SetBool";
pub const SET_BYTES: &str = "SetBytes";
pub const SET_CONTENT: &str = "SetContent";
pub const SET_KEY_VALUES: &str = "SetKeyValues";

// Built-in functions
pub const PRINT: &str = "print";
pub const PRINTLN: &str = "println";
pub const INPUT: &str = "input";
pub const ID: &str = "id";
pub const HASH_FN: &str = "hash";
pub const DIR: &str = "dir";
pub const LEN: &str = "len";
