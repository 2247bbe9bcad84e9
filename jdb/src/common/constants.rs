// doc constants
pub const DOC_ID: &str = "_id";
pub const DOC_CREATED: &str = "_created";
pub const DOC_UPDATED: &str = "_updated";
pub const RESERVED_FIELDS: [&str; 3] = [DOC_ID, DOC_CREATED, DOC_UPDATED];

// Compile-time assertion for reserved fields count
const _: () = {
    const RESERVED_FIELDS_COUNT: usize = 3;
    const ACTUAL_COUNT: usize = RESERVED_FIELDS.len();
    const _: [(); 1] = [(); (ACTUAL_COUNT == RESERVED_FIELDS_COUNT) as usize];
};

// store constants
pub const COLLECTION_FILE_EXT: &str = "jdb";
pub const TEMP_FILE_SUFFIX: &str = "tmp";
pub const DEFAULT_ROOT_DIR: &str = "./data";

// filter operator constants
pub const OP_AND: &str = "$and";
pub const OP_OR: &str = "$or";
pub const OP_EQ: &str = "$eq";
pub const OP_NE: &str = "$ne";
pub const OP_GT: &str = "$gt";
pub const OP_GTE: &str = "$gte";
pub const OP_LT: &str = "$lt";
pub const OP_LTE: &str = "$lte";
pub const OP_IN: &str = "$in";
pub const OP_NIN: &str = "$nin";
pub const OP_REGEX: &str = "$regex";

// update operator constants
pub const OP_SET: &str = "$set";
pub const OP_UNSET: &str = "$unset";
pub const OP_INC: &str = "$inc";
pub const OP_PUSH: &str = "$push";
pub const OP_PULL: &str = "$pull";
