use crate::{HdbError, HdbResult};

/// ID of the value type of a database column or a parameter.
///
/// The set is closed and versioned with the protocol; unknown codes are rejected
/// with [`HdbError::UnknownTypeCode`].
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum TypeId {
    /// For database type TINYINT.
    TINYINT = 1,
    /// For database type SMALLINT.
    SMALLINT = 2,
    /// For database type INT.
    INT = 3,
    /// For database type BIGINT.
    BIGINT = 4,
    /// For database type DECIMAL and SMALLDECIMAL, in the 16-byte floating transport format.
    DECIMAL = 5,
    /// For database type REAL.
    REAL = 6,
    /// For database type DOUBLE.
    DOUBLE = 7,
    /// For database type CHAR.
    CHAR = 8,
    /// For database type VARCHAR.
    VARCHAR = 9,
    /// For database type NCHAR.
    NCHAR = 10,
    /// For database type NVARCHAR.
    NVARCHAR = 11,
    /// For database type BINARY.
    BINARY = 12,
    /// For database type VARBINARY.
    VARBINARY = 13,
    /// For database type CLOB.
    CLOB = 25,
    /// For database type NCLOB.
    NCLOB = 26,
    /// For database type BLOB.
    BLOB = 27,
    /// For database type BOOLEAN.
    BOOLEAN = 28,
    /// For database type STRING.
    STRING = 29,
    /// For database type NSTRING.
    NSTRING = 30,
    /// Binary LOB locator.
    BLOCATOR = 31,
    /// Binary string.
    BSTRING = 33,
    /// For database type TEXT.
    TEXT = 51,
    /// For database type SHORTTEXT.
    SHORTTEXT = 52,
    /// For database type BINTEXT.
    BINTEXT = 53,
    /// For database type ALPHANUM.
    ALPHANUM = 55,
    /// For database type LONGDATE.
    LONGDATE = 61,
    /// For database type SECONDDATE.
    SECONDDATE = 62,
    /// For database type DAYDATE.
    DAYDATE = 63,
    /// For database type SECONDTIME.
    SECONDTIME = 64,
    /// For database type GEOMETRY.
    GEOMETRY = 74,
    /// For database type POINT.
    POINT = 75,
    /// Transport format for database type DECIMAL, 16 bytes.
    FIXED16 = 76,
    /// Transport format for database type DECIMAL, 8 bytes.
    FIXED8 = 81,
    /// Transport format for database type DECIMAL, 12 bytes.
    FIXED12 = 82,
}

/// Identifies the typed read of [`Reader`](crate::Reader) that decodes a value of a given type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReadFunction {
    /// [`Reader::read_tinyint`](crate::Reader::read_tinyint)
    ReadTinyInt,
    /// [`Reader::read_smallint`](crate::Reader::read_smallint)
    ReadSmallInt,
    /// [`Reader::read_int`](crate::Reader::read_int)
    ReadInt,
    /// [`Reader::read_bigint`](crate::Reader::read_bigint)
    ReadBigInt,
    /// [`Reader::read_decimal`](crate::Reader::read_decimal)
    ReadDecimal,
    /// [`Reader::read_fixed8`](crate::Reader::read_fixed8)
    ReadFixed8,
    /// [`Reader::read_fixed12`](crate::Reader::read_fixed12)
    ReadFixed12,
    /// [`Reader::read_fixed16`](crate::Reader::read_fixed16)
    ReadFixed16,
    /// [`Reader::read_real`](crate::Reader::read_real)
    ReadReal,
    /// [`Reader::read_double`](crate::Reader::read_double)
    ReadDouble,
    /// [`Reader::read_boolean`](crate::Reader::read_boolean)
    ReadBoolean,
    /// [`Reader::read_string`](crate::Reader::read_string)
    ReadString,
    /// [`Reader::read_alphanum`](crate::Reader::read_alphanum)
    ReadAlphanum,
    /// [`Reader::read_binary`](crate::Reader::read_binary)
    ReadBinary,
    /// [`Reader::read_longdate`](crate::Reader::read_longdate)
    ReadLongDate,
    /// [`Reader::read_seconddate`](crate::Reader::read_seconddate)
    ReadSecondDate,
    /// [`Reader::read_daydate`](crate::Reader::read_daydate)
    ReadDayDate,
    /// [`Reader::read_secondtime`](crate::Reader::read_secondtime)
    ReadSecondTime,
    /// [`Reader::read_blob`](crate::Reader::read_blob)
    ReadBLob,
    /// [`Reader::read_clob`](crate::Reader::read_clob)
    ReadCLob,
    /// [`Reader::read_nclob`](crate::Reader::read_nclob)
    ReadNCLob,
}
impl ReadFunction {
    /// True for the reads that take the decimal fraction as argument.
    pub fn takes_fraction(self) -> bool {
        matches!(
            self,
            Self::ReadDecimal | Self::ReadFixed8 | Self::ReadFixed12 | Self::ReadFixed16
        )
    }
}

/// How a value of a type is laid out on the wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WireWidth {
    /// The given number of bytes, including a NULL indicator where the type has one;
    /// a NULL value of such a type consists of the indicator byte only.
    Fixed(usize),
    /// A length indicator followed by the given number of bytes.
    Variable,
    /// A LOB descriptor, optionally followed by an inline data chunk.
    Lob,
}

impl TypeId {
    /// Looks up a wire type code.
    ///
    /// The protocol uses ids < 128 for non-null values and ids > 128 for nullable values;
    /// both are accepted.
    pub fn try_new(code: u8) -> HdbResult<Self> {
        Ok(match code & 0b_0111_1111 {
            1 => Self::TINYINT,
            2 => Self::SMALLINT,
            3 => Self::INT,
            4 => Self::BIGINT,
            5 => Self::DECIMAL,
            6 => Self::REAL,
            7 => Self::DOUBLE,
            8 => Self::CHAR,
            9 => Self::VARCHAR,
            10 => Self::NCHAR,
            11 => Self::NVARCHAR,
            12 => Self::BINARY,
            13 => Self::VARBINARY,
            // DATE: 14, TIME: 15, TIMESTAMP: 16 (all deprecated with protocol version 3)
            // 17 - 24: reserved, do not use
            25 => Self::CLOB,
            26 => Self::NCLOB,
            27 => Self::BLOB,
            28 => Self::BOOLEAN,
            29 => Self::STRING,
            30 => Self::NSTRING,
            31 => Self::BLOCATOR,
            33 => Self::BSTRING,
            51 => Self::TEXT,
            52 => Self::SHORTTEXT,
            53 => Self::BINTEXT,
            55 => Self::ALPHANUM,
            61 => Self::LONGDATE,
            62 => Self::SECONDDATE,
            63 => Self::DAYDATE,
            64 => Self::SECONDTIME,
            74 => Self::GEOMETRY,
            75 => Self::POINT,
            76 => Self::FIXED16,
            81 => Self::FIXED8,
            82 => Self::FIXED12,
            _ => return Err(HdbError::UnknownTypeCode(code)),
        })
    }

    /// The wire type code, with the nullable flag if requested.
    pub fn type_code(self, nullable: bool) -> u8 {
        (if nullable { 128 } else { 0 }) + self as u8
    }

    /// The typed read that decodes values of this type.
    pub fn read_function(self) -> ReadFunction {
        match self {
            Self::TINYINT => ReadFunction::ReadTinyInt,
            Self::SMALLINT => ReadFunction::ReadSmallInt,
            Self::INT => ReadFunction::ReadInt,
            Self::BIGINT => ReadFunction::ReadBigInt,
            Self::DECIMAL => ReadFunction::ReadDecimal,
            Self::FIXED8 => ReadFunction::ReadFixed8,
            Self::FIXED12 => ReadFunction::ReadFixed12,
            Self::FIXED16 => ReadFunction::ReadFixed16,
            Self::REAL => ReadFunction::ReadReal,
            Self::DOUBLE => ReadFunction::ReadDouble,
            Self::BOOLEAN => ReadFunction::ReadBoolean,
            Self::CHAR
            | Self::VARCHAR
            | Self::NCHAR
            | Self::NVARCHAR
            | Self::STRING
            | Self::NSTRING
            | Self::SHORTTEXT => ReadFunction::ReadString,
            Self::ALPHANUM => ReadFunction::ReadAlphanum,
            Self::BINARY
            | Self::VARBINARY
            | Self::BSTRING
            | Self::GEOMETRY
            | Self::POINT => ReadFunction::ReadBinary,
            Self::LONGDATE => ReadFunction::ReadLongDate,
            Self::SECONDDATE => ReadFunction::ReadSecondDate,
            Self::DAYDATE => ReadFunction::ReadDayDate,
            Self::SECONDTIME => ReadFunction::ReadSecondTime,
            Self::BLOB | Self::BLOCATOR | Self::BINTEXT => ReadFunction::ReadBLob,
            Self::CLOB => ReadFunction::ReadCLob,
            Self::NCLOB | Self::TEXT => ReadFunction::ReadNCLob,
        }
    }

    /// How values of this type are laid out on the wire.
    pub fn wire_width(self) -> WireWidth {
        match self {
            Self::BOOLEAN => WireWidth::Fixed(1),
            Self::TINYINT => WireWidth::Fixed(2),
            Self::SMALLINT => WireWidth::Fixed(3),
            Self::INT => WireWidth::Fixed(5),
            Self::BIGINT | Self::FIXED8 => WireWidth::Fixed(9),
            Self::FIXED12 => WireWidth::Fixed(13),
            Self::FIXED16 => WireWidth::Fixed(17),
            Self::DECIMAL => WireWidth::Fixed(16),
            Self::REAL | Self::DAYDATE | Self::SECONDTIME => WireWidth::Fixed(4),
            Self::DOUBLE | Self::LONGDATE | Self::SECONDDATE => WireWidth::Fixed(8),
            Self::CHAR
            | Self::VARCHAR
            | Self::NCHAR
            | Self::NVARCHAR
            | Self::STRING
            | Self::NSTRING
            | Self::SHORTTEXT
            | Self::ALPHANUM
            | Self::BINARY
            | Self::VARBINARY
            | Self::BSTRING
            | Self::GEOMETRY
            | Self::POINT => WireWidth::Variable,
            Self::CLOB
            | Self::NCLOB
            | Self::TEXT
            | Self::BLOB
            | Self::BLOCATOR
            | Self::BINTEXT => WireWidth::Lob,
        }
    }

    /// Returns true for BLOB, CLOB, NCLOB and their aliases.
    pub fn is_lob(self) -> bool {
        self.wire_width() == WireWidth::Lob
    }

    /// Returns true for the types whose values are scaled by the column's fraction.
    pub fn is_decimal(self) -> bool {
        self.read_function().takes_fraction()
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            fmt,
            "{}",
            match self {
                Self::TINYINT => "TINYINT",
                Self::SMALLINT => "SMALLINT",
                Self::INT => "INT",
                Self::BIGINT => "BIGINT",
                Self::DECIMAL => "DECIMAL",
                Self::REAL => "REAL",
                Self::DOUBLE => "DOUBLE",
                Self::CHAR => "CHAR",
                Self::VARCHAR => "VARCHAR",
                Self::NCHAR => "NCHAR",
                Self::NVARCHAR => "NVARCHAR",
                Self::BINARY => "BINARY",
                Self::VARBINARY => "VARBINARY",
                Self::CLOB => "CLOB",
                Self::NCLOB => "NCLOB",
                Self::BLOB => "BLOB",
                Self::BOOLEAN => "BOOLEAN",
                Self::STRING => "STRING",
                Self::NSTRING => "NSTRING",
                Self::BLOCATOR => "BLOCATOR",
                Self::BSTRING => "BSTRING",
                Self::TEXT => "TEXT",
                Self::SHORTTEXT => "SHORTTEXT",
                Self::BINTEXT => "BINTEXT",
                Self::ALPHANUM => "ALPHANUM",
                Self::LONGDATE => "LONGDATE",
                Self::SECONDDATE => "SECONDDATE",
                Self::DAYDATE => "DAYDATE",
                Self::SECONDTIME => "SECONDTIME",
                Self::GEOMETRY => "GEOMETRY",
                Self::POINT => "POINT",
                Self::FIXED16 => "FIXED16",
                Self::FIXED8 => "FIXED8",
                Self::FIXED12 => "FIXED12",
            }
        )
    }
}
