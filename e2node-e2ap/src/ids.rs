//! E2AP procedure codes and protocol IE identifiers (O-RAN.WG3.E2AP v2)

// Procedure codes
pub const ID_E2_SETUP: u8 = 1;
pub const ID_ERROR_INDICATION: u8 = 2;
pub const ID_RESET: u8 = 3;
pub const ID_RIC_CONTROL: u8 = 4;
pub const ID_RIC_INDICATION: u8 = 5;
pub const ID_RIC_SERVICE_QUERY: u8 = 6;
pub const ID_RIC_SERVICE_UPDATE: u8 = 7;
pub const ID_RIC_SUBSCRIPTION: u8 = 8;
pub const ID_RIC_SUBSCRIPTION_DELETE: u8 = 9;
pub const ID_E2_NODE_CONFIGURATION_UPDATE: u8 = 10;
pub const ID_E2_CONNECTION_UPDATE: u8 = 11;
pub const ID_RIC_SUBSCRIPTION_DELETE_REQUIRED: u8 = 12;
pub const ID_E2_REMOVAL: u8 = 13;

// Protocol IE identifiers
pub const ID_CAUSE: u16 = 1;
pub const ID_CRITICALITY_DIAGNOSTICS: u16 = 2;
pub const ID_GLOBAL_E2_NODE_ID: u16 = 3;
pub const ID_GLOBAL_RIC_ID: u16 = 4;
pub const ID_RAN_FUNCTION_ID: u16 = 5;
pub const ID_RAN_FUNCTION_ID_ITEM: u16 = 6;
pub const ID_RAN_FUNCTION_IE_CAUSE_ITEM: u16 = 7;
pub const ID_RAN_FUNCTION_ITEM: u16 = 8;
pub const ID_RAN_FUNCTIONS_ACCEPTED: u16 = 9;
pub const ID_RAN_FUNCTIONS_ADDED: u16 = 10;
pub const ID_RAN_FUNCTIONS_DELETED: u16 = 11;
pub const ID_RAN_FUNCTIONS_MODIFIED: u16 = 12;
pub const ID_RAN_FUNCTIONS_REJECTED: u16 = 13;
pub const ID_RIC_ACTION_ADMITTED_ITEM: u16 = 14;
pub const ID_RIC_ACTION_ID: u16 = 15;
pub const ID_RIC_ACTION_NOT_ADMITTED_ITEM: u16 = 16;
pub const ID_RIC_ACTIONS_ADMITTED: u16 = 17;
pub const ID_RIC_ACTIONS_NOT_ADMITTED: u16 = 18;
pub const ID_RIC_ACTION_TO_BE_SETUP_ITEM: u16 = 19;
pub const ID_RIC_CALL_PROCESS_ID: u16 = 20;
pub const ID_RIC_INDICATION_HEADER: u16 = 25;
pub const ID_RIC_INDICATION_MESSAGE: u16 = 26;
pub const ID_RIC_INDICATION_SN: u16 = 27;
pub const ID_RIC_INDICATION_TYPE: u16 = 28;
pub const ID_RIC_REQUEST_ID: u16 = 29;
pub const ID_RIC_SUBSCRIPTION_DETAILS: u16 = 30;
pub const ID_TIME_TO_WAIT: u16 = 31;
pub const ID_TRANSACTION_ID: u16 = 49;
pub const ID_E2_NODE_COMPONENT_CONFIG_ADDITION: u16 = 50;
pub const ID_E2_NODE_COMPONENT_CONFIG_ADDITION_ITEM: u16 = 51;
pub const ID_E2_NODE_COMPONENT_CONFIG_ADDITION_ACK: u16 = 52;
pub const ID_E2_NODE_COMPONENT_CONFIG_ADDITION_ACK_ITEM: u16 = 53;
