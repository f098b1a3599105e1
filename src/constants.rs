//! Wire-level constants shared by the HTTP, websocket and node surfaces.

/// HTTP endpoint serving directory listings and workflow loads.
pub const LOCAL_FILES_ENDPOINT: &str = "/local_files";

/// HTTP endpoint for file mutation operations.
pub const FILE_OPERATIONS_ENDPOINT: &str = "/file_operations";

/// Base path for static asset delivery. Routes are registered as
/// `{STATIC_FILES_ENDPOINT}/{{*filepath}}`.
pub const STATIC_FILES_ENDPOINT: &str = "/nz_static";

/// Message type this plugin claims on the host's websocket bus.
pub const WEBSOCKET_MESSAGE_TYPE: &str = "nz_workflow_manager";

/// Message type of every websocket response we emit.
pub const WEBSOCKET_RESPONSE_TYPE: &str = "nz_workflow_manager_response";

/// Extensions recognized as workflow files. Lowercase, dot included.
pub const SUPPORTED_WORKFLOW_EXTENSIONS: &[&str] = &[".json"];

/// Characters that are never allowed in a file or directory name.
pub const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*', '\\', '/'];

/// Windows reserved device names, rejected case-insensitively.
pub const RESERVED_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Maximum accepted length, in characters, of a file or directory name.
pub const MAX_FILENAME_LEN: usize = 255;

/// Category under which our nodes appear in the host's graph UI.
pub const NODE_CATEGORY: &str = "NZ Workflow";
