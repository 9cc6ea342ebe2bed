use crate::{HdbError, HdbResult};

/// Identifies the nature of the statement or functionality that has been
/// prepared or executed.
///
/// Irrelevant numbers (ABAP stuff, "reserved") are omitted.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum FunctionCode {
    /// Nil
    #[default]
    Nil = 0,
    /// DDL statement
    Ddl = 1,
    /// INSERT statement
    Insert = 2,
    /// UPDATE statement
    Update = 3,
    /// DELETE statement
    Delete = 4,
    /// SELECT statement
    Select = 5,
    /// SELECT … FOR UPDATE statement
    SelectForUpdate = 6,
    /// EXPLAIN statement
    Explain = 7,
    /// CALL statement
    DbProcedureCall = 8,
    /// CALL statement returning one or more results
    DbProcedureCallWithResult = 9,
    /// FETCH message
    Fetch = 10,
    /// COMMIT message or statement
    Commit = 11,
    /// ROLLBACK message or statement
    Rollback = 12,
    /// SAVEPOINT statement
    Savepoint = 13,
    /// CONNECT or AUTHENTICATION message
    Connect = 14,
    /// WRITELOB message
    WriteLob = 15,
    /// READLOB message
    ReadLob = 16,
    /// PING message
    Ping = 17,
    /// DISCONNECT message
    Disconnect = 18,
    /// CLOSECURSOR message
    CloseCursor = 19,
    /// FINDLOB message
    FindLob = 20,
    /// ABAPSTREAM message
    AbapStream = 21,
    /// XA_START message
    XaStart = 22,
    /// XA_JOIN message
    XaJoin = 23,
    /// undocumented
    XaControl = 25,
    /// undocumented
    XaPrepare = 26,
    /// undocumented
    XaRecover = 27,
}

impl FunctionCode {
    pub(crate) fn from_i16(val: i16) -> HdbResult<Self> {
        match val {
            0 => Ok(Self::Nil),
            1 => Ok(Self::Ddl),
            2 => Ok(Self::Insert),
            3 => Ok(Self::Update),
            4 => Ok(Self::Delete),
            5 => Ok(Self::Select),
            6 => Ok(Self::SelectForUpdate),
            7 => Ok(Self::Explain),
            8 => Ok(Self::DbProcedureCall),
            9 => Ok(Self::DbProcedureCallWithResult),
            10 => Ok(Self::Fetch),
            11 => Ok(Self::Commit),
            12 => Ok(Self::Rollback),
            13 => Ok(Self::Savepoint),
            14 => Ok(Self::Connect),
            15 => Ok(Self::WriteLob),
            16 => Ok(Self::ReadLob),
            17 => Ok(Self::Ping),
            18 => Ok(Self::Disconnect),
            19 => Ok(Self::CloseCursor),
            20 => Ok(Self::FindLob),
            21 => Ok(Self::AbapStream),
            22 => Ok(Self::XaStart),
            23 => Ok(Self::XaJoin),
            25 => Ok(Self::XaControl),
            26 => Ok(Self::XaPrepare),
            27 => Ok(Self::XaRecover),
            _ => Err(HdbError::malformed(format!(
                "found unexpected value {val} for FunctionCode"
            ))),
        }
    }

    /// The protocol's name of the function code.
    pub fn label(self) -> &'static str {
        match self {
            Self::Nil => "NIL",
            Self::Ddl => "DDL",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Select => "SELECT",
            Self::SelectForUpdate => "SELECT_FOR_UPDATE",
            Self::Explain => "EXPLAIN",
            Self::DbProcedureCall => "DB_PROCEDURE_CALL",
            Self::DbProcedureCallWithResult => "DB_PROCEDURE_CALL_WITH_RESULT",
            Self::Fetch => "FETCH",
            Self::Commit => "COMMIT",
            Self::Rollback => "ROLLBACK",
            Self::Savepoint => "SAVEPOINT",
            Self::Connect => "CONNECT",
            Self::WriteLob => "WRITE_LOB",
            Self::ReadLob => "READ_LOB",
            Self::Ping => "PING",
            Self::Disconnect => "DISCONNECT",
            Self::CloseCursor => "CLOSE_CURSOR",
            Self::FindLob => "FIND_LOB",
            Self::AbapStream => "ABAP_STREAM",
            Self::XaStart => "XA_START",
            Self::XaJoin => "XA_JOIN",
            Self::XaControl => "XA_CONTROL",
            Self::XaPrepare => "XA_PREPARE",
            Self::XaRecover => "XA_RECOVER",
        }
    }
}

impl std::fmt::Display for FunctionCode {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "FunctionCode.{}", self.label())
    }
}
