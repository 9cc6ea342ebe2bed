use crate::{HdbError, HdbResult};

// Here we list all those parts that can occur in a segment.
// ABAP related stuff and "reserved" numbers is omitted.
/// Identifies the content of a [`Part`](crate::Part).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// SQL Command Data
    Command = 3,
    /// Tabular resultset data
    ResultSet = 5,
    /// Error information
    Error = 6,
    /// Prepared statement identifier
    StatementId = 10,
    /// Transaction identifier
    TransactionId = 11,
    /// Number of affected rows of dml statement
    ExecutionResult = 12,
    /// Identifier of resultset
    ResultSetId = 13,
    /// Topology information
    TopologyInformation = 15,
    /// Location of table data
    TableLocation = 16,
    /// Request data of READLOB message
    ReadLobRequest = 17,
    /// Reply data of READLOB message
    ReadLobReply = 18,
    /// Command information
    CommandInfo = 27,
    /// Request data of WRITELOB message
    WriteLobRequest = 28,
    /// Client context
    ClientContext = 29,
    /// Reply data of WRITELOB message
    WriteLobReply = 30,
    /// Parameter data
    Parameters = 32,
    /// Authentication data
    Authentication = 33,
    /// Session context information
    SessionContext = 34,
    /// Statement visibility context
    StatementContext = 39,
    /// Table partitioning information
    PartitionInformation = 40,
    /// Output parameter data
    OutputParameters = 41,
    /// Connect options
    ConnectOptions = 42,
    /// Commit options
    CommitOptions = 43,
    /// Fetch options
    FetchOptions = 44,
    /// Number of rows to fetch
    FetchSize = 45,
    /// Parameter metadata (type and length information)
    ParameterMetadata = 47,
    /// Result set metadata (type, name, information)
    ResultSetMetadata = 48,
    /// Request data of FINDLOB message
    FindLobRequest = 49,
    /// Reply data of FINDLOB message
    FindLobReply = 50,
    /// Client information values
    ClientInfo = 57,
    /// Transaction handling flags
    TransactionFlags = 64,
    /// LOB flags
    LobFlags = 68,
    /// Additional context data for result sets
    ResultsetOptions = 69,
    /// XA transaction information (XA transaction ID)
    XatOptions = 70,
    /// undocumented
    SessionVariable = 71,
    /// undocumented
    WorkloadReplayContext = 72,
    /// undocumented
    SQLReplyOptions = 73,
    /// undocumented
    PrintOptions = 74,
}

impl PartKind {
    pub(crate) fn from_i8(val: i8) -> HdbResult<PartKind> {
        match val {
            3 => Ok(PartKind::Command),
            5 => Ok(PartKind::ResultSet),
            6 => Ok(PartKind::Error),
            10 => Ok(PartKind::StatementId),
            11 => Ok(PartKind::TransactionId),
            12 => Ok(PartKind::ExecutionResult),
            13 => Ok(PartKind::ResultSetId),
            15 => Ok(PartKind::TopologyInformation),
            16 => Ok(PartKind::TableLocation),
            17 => Ok(PartKind::ReadLobRequest),
            18 => Ok(PartKind::ReadLobReply),
            27 => Ok(PartKind::CommandInfo),
            28 => Ok(PartKind::WriteLobRequest),
            29 => Ok(PartKind::ClientContext),
            30 => Ok(PartKind::WriteLobReply),
            32 => Ok(PartKind::Parameters),
            33 => Ok(PartKind::Authentication),
            34 => Ok(PartKind::SessionContext),
            39 => Ok(PartKind::StatementContext),
            40 => Ok(PartKind::PartitionInformation),
            41 => Ok(PartKind::OutputParameters),
            42 => Ok(PartKind::ConnectOptions),
            43 => Ok(PartKind::CommitOptions),
            44 => Ok(PartKind::FetchOptions),
            45 => Ok(PartKind::FetchSize),
            47 => Ok(PartKind::ParameterMetadata),
            48 => Ok(PartKind::ResultSetMetadata),
            49 => Ok(PartKind::FindLobRequest),
            50 => Ok(PartKind::FindLobReply),
            57 => Ok(PartKind::ClientInfo),
            64 => Ok(PartKind::TransactionFlags),
            68 => Ok(PartKind::LobFlags),
            69 => Ok(PartKind::ResultsetOptions),
            70 => Ok(PartKind::XatOptions),
            71 => Ok(PartKind::SessionVariable),
            72 => Ok(PartKind::WorkloadReplayContext),
            73 => Ok(PartKind::SQLReplyOptions),
            74 => Ok(PartKind::PrintOptions),
            _ => Err(HdbError::malformed(format!("unknown part kind {val}"))),
        }
    }

    /// The protocol's name of the part kind.
    pub fn label(self) -> &'static str {
        match self {
            PartKind::Command => "COMMAND",
            PartKind::ResultSet => "RESULT_SET",
            PartKind::Error => "ERROR",
            PartKind::StatementId => "STATEMENT_ID",
            PartKind::TransactionId => "TRANSACTION_ID",
            PartKind::ExecutionResult => "ROWS_AFFECTED",
            PartKind::ResultSetId => "RESULT_SET_ID",
            PartKind::TopologyInformation => "TOPOLOGY_INFORMATION",
            PartKind::TableLocation => "TABLE_LOCATION",
            PartKind::ReadLobRequest => "READ_LOB_REQUEST",
            PartKind::ReadLobReply => "READ_LOB_REPLY",
            PartKind::CommandInfo => "COMMAND_INFO",
            PartKind::WriteLobRequest => "WRITE_LOB_REQUEST",
            PartKind::ClientContext => "CLIENT_CONTEXT",
            PartKind::WriteLobReply => "WRITE_LOB_REPLY",
            PartKind::Parameters => "PARAMETERS",
            PartKind::Authentication => "AUTHENTICATION",
            PartKind::SessionContext => "SESSION_CONTEXT",
            PartKind::StatementContext => "STATEMENT_CONTEXT",
            PartKind::PartitionInformation => "PARTITION_INFORMATION",
            PartKind::OutputParameters => "OUTPUT_PARAMETERS",
            PartKind::ConnectOptions => "CONNECT_OPTIONS",
            PartKind::CommitOptions => "COMMIT_OPTIONS",
            PartKind::FetchOptions => "FETCH_OPTIONS",
            PartKind::FetchSize => "FETCH_SIZE",
            PartKind::ParameterMetadata => "PARAMETER_METADATA",
            PartKind::ResultSetMetadata => "RESULT_SET_METADATA",
            PartKind::FindLobRequest => "FIND_LOB_REQUEST",
            PartKind::FindLobReply => "FIND_LOB_REPLY",
            PartKind::ClientInfo => "CLIENT_INFO",
            PartKind::TransactionFlags => "TRANSACTION_FLAGS",
            PartKind::LobFlags => "LOB_FLAGS",
            PartKind::ResultsetOptions => "RESULT_SET_OPTIONS",
            PartKind::XatOptions => "XAT_OPTIONS",
            PartKind::SessionVariable => "SESSION_VARIABLE",
            PartKind::WorkloadReplayContext => "WORKLOAD_REPLAY_CONTEXT",
            PartKind::SQLReplyOptions => "SQL_REPLY_OPTIONS",
            PartKind::PrintOptions => "PRINT_OPTIONS",
        }
    }
}

impl std::fmt::Display for PartKind {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "PartKind.{}", self.label())
    }
}
