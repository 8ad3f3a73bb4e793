//! Simple names of the framework annotations the processor understands.

pub const REST_CONTROLLER: &str = "RestController";

pub const REQUEST_MAPPING: &str = "RequestMapping";
pub const GET_MAPPING: &str = "GetMapping";
pub const POST_MAPPING: &str = "PostMapping";
pub const PUT_MAPPING: &str = "PutMapping";
pub const DELETE_MAPPING: &str = "DeleteMapping";
pub const PATCH_MAPPING: &str = "PatchMapping";

/// Handler annotations in the order they are probed on a method.
pub const HANDLER_ANNOTATIONS: [&str; 6] = [
    REQUEST_MAPPING,
    GET_MAPPING,
    POST_MAPPING,
    PUT_MAPPING,
    DELETE_MAPPING,
    PATCH_MAPPING,
];

pub const PATH_VARIABLE: &str = "PathVariable";
pub const REQUEST_PARAM: &str = "RequestParam";
pub const REQUEST_BODY: &str = "RequestBody";

pub const JSON_PROPERTY: &str = "JsonProperty";
pub const JSON_IGNORE: &str = "JsonIgnore";
pub const NOT_NULL_ANNOTATIONS: [&str; 3] = ["NotNull", "NonNull", "Nonnull"];
