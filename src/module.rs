//! Decoder for the embedded validator modules.
//!
//! Modules use the WebAssembly 1.0 binary layout, restricted to what a
//! single-predicate validator needs: `i32` signatures, function exports, and
//! straight-line code bodies. Table, memory, global and the remaining standard
//! sections are accepted and skipped by size.

use crate::errors::GateError;

pub const WASM_MAGIC: [u8; 4] = *b"\0asm";
pub const WASM_VERSION: u32 = 1;

const SEC_CUSTOM: u8 = 0;
const SEC_TYPE: u8 = 1;
const SEC_FUNCTION: u8 = 3;
const SEC_EXPORT: u8 = 7;
const SEC_CODE: u8 = 10;
const SEC_MAX_KNOWN: u8 = 12;   // data count

const FUNC_TYPE_FORM: u8 = 0x60;
const VALTYPE_I32: u8 = 0x7f;

// Guards against hostile counts before allocating.
const MAX_ENTRIES: u32 = 1024;

/// Byte cursor with LEB128 helpers.
pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self { Self { bytes, pos: 0 } }

    #[must_use]
    pub const fn position(&self) -> usize { self.pos }

    #[must_use]
    pub const fn is_empty(&self) -> bool { self.pos >= self.bytes.len() }

    pub fn read_u8(&mut self) -> Result<u8, GateError> {
        let b = *self.bytes.get(self.pos).ok_or(GateError::InvalidModule("unexpected end of input"))?;
        self.pos += 1;
        Ok(b)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], GateError> {
        let end = self.pos.checked_add(n).ok_or(GateError::InvalidModule("length overflow"))?;
        let out = self.bytes.get(self.pos..end).ok_or(GateError::InvalidModule("unexpected end of input"))?;
        self.pos = end;
        Ok(out)
    }

    /// Unsigned LEB128, at most five bytes.
    pub fn read_var_u32(&mut self) -> Result<u32, GateError> {
        let mut result: u32 = 0;
        let mut shift = 0u32;
        loop {
            let b = self.read_u8()?;
            if shift == 28 && (b & 0x70) != 0 {
                return Err(GateError::InvalidModule("varuint32 overflow"));
            }
            result |= u32::from(b & 0x7f) << shift;
            if b & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
            if shift > 28 {
                return Err(GateError::InvalidModule("varuint32 too long"));
            }
        }
    }

    /// Signed LEB128 into an `i32`, at most five bytes.
    pub fn read_var_i32(&mut self) -> Result<i32, GateError> {
        let mut result: i64 = 0;
        let mut shift = 0u32;
        loop {
            let b = self.read_u8()?;
            result |= i64::from(b & 0x7f) << shift;
            shift += 7;
            if b & 0x80 == 0 {
                if shift < 64 && (b & 0x40) != 0 {
                    result |= -1i64 << shift;
                }
                return i32::try_from(result).map_err(|_| GateError::InvalidModule("varint32 out of range"));
            }
            if shift >= 35 {
                return Err(GateError::InvalidModule("varint32 too long"));
            }
        }
    }

    pub fn read_name(&mut self) -> Result<String, GateError> {
        let len = self.read_var_u32()? as usize;
        let raw = self.read_bytes(len)?;
        core::str::from_utf8(raw)
            .map(str::to_owned)
            .map_err(|_| GateError::InvalidModule("export name is not utf-8"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncType {
    pub params: usize,
    pub results: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind { Func, Table, Memory, Global }

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub name: String,
    pub kind: ExportKind,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncBody {
    /// Declared locals beyond the parameters, all `i32`.
    pub locals: u32,
    pub code: Vec<u8>,
}

/// A decoded module. Function `i` has signature `types[funcs[i]]` and body `bodies[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    pub types: Vec<FuncType>,
    pub funcs: Vec<u32>,
    pub exports: Vec<Export>,
    pub bodies: Vec<FuncBody>,
}

impl Module {
    /// Decode and validate a module binary.
    ///
    /// # Errors
    ///
    /// Returns `GateError::InvalidModule` when the bytes are not a well-formed module
    /// within the supported subset.
    pub fn decode(bytes: &[u8]) -> Result<Self, GateError> {
        let mut r = Reader::new(bytes);
        if r.read_bytes(4)? != WASM_MAGIC {
            return Err(GateError::InvalidModule("bad magic"));
        }
        let mut version = [0u8; 4];
        version.copy_from_slice(r.read_bytes(4)?);
        if u32::from_le_bytes(version) != WASM_VERSION {
            return Err(GateError::InvalidModule("unsupported version"));
        }

        let mut module = Self::default();
        let mut last_id = 0u8;
        while !r.is_empty() {
            let id = r.read_u8()?;
            let size = r.read_var_u32()? as usize;
            let payload = r.read_bytes(size)?;
            if id != SEC_CUSTOM {
                if id > SEC_MAX_KNOWN {
                    return Err(GateError::InvalidModule("unknown section id"));
                }
                if id <= last_id {
                    return Err(GateError::InvalidModule("sections out of order"));
                }
                last_id = id;
            }
            let mut s = Reader::new(payload);
            match id {
                SEC_TYPE => module.types = decode_types(&mut s)?,
                SEC_FUNCTION => module.funcs = decode_vec(&mut s, Reader::read_var_u32)?,
                SEC_EXPORT => module.exports = decode_vec(&mut s, decode_export)?,
                SEC_CODE => module.bodies = decode_vec(&mut s, decode_body)?,
                _ => continue,
            }
            if !s.is_empty() {
                return Err(GateError::InvalidModule("section size mismatch"));
            }
        }
        module.validate()?;
        Ok(module)
    }

    fn validate(&self) -> Result<(), GateError> {
        if self.funcs.len() != self.bodies.len() {
            return Err(GateError::InvalidModule("function and code counts differ"));
        }
        if self.funcs.iter().any(|&t| t as usize >= self.types.len()) {
            return Err(GateError::InvalidModule("type index out of range"));
        }
        let bad_export = self.exports.iter().any(|e| {
            e.kind == ExportKind::Func && e.index as usize >= self.funcs.len()
        });
        if bad_export {
            return Err(GateError::InvalidModule("export index out of range"));
        }
        Ok(())
    }

    /// Index of the function exported as `name`.
    ///
    /// # Errors
    ///
    /// Returns `GateError::MissingExport` if no function export has that name.
    pub fn export_func(&self, name: &str) -> Result<u32, GateError> {
        self.exports
            .iter()
            .find(|e| e.kind == ExportKind::Func && e.name == name)
            .map(|e| e.index)
            .ok_or_else(|| GateError::MissingExport(name.to_owned()))
    }

    #[must_use]
    pub fn func_type(&self, func: u32) -> Option<&FuncType> {
        let ty = *self.funcs.get(func as usize)?;
        self.types.get(ty as usize)
    }

    #[must_use]
    pub fn body(&self, func: u32) -> Option<&FuncBody> {
        self.bodies.get(func as usize)
    }
}

fn decode_vec<'a, T>(
    r: &mut Reader<'a>,
    mut item: impl FnMut(&mut Reader<'a>) -> Result<T, GateError>,
) -> Result<Vec<T>, GateError> {
    let count = r.read_var_u32()?;
    if count > MAX_ENTRIES {
        return Err(GateError::InvalidModule("too many entries"));
    }
    let mut out = Vec::with_capacity(count as usize);
    for _ in 0..count {
        out.push(item(r)?);
    }
    Ok(out)
}

fn decode_types(r: &mut Reader<'_>) -> Result<Vec<FuncType>, GateError> {
    decode_vec(r, |r| {
        if r.read_u8()? != FUNC_TYPE_FORM {
            return Err(GateError::InvalidModule("expected func type"));
        }
        let params = decode_valtypes(r)?;
        let results = decode_valtypes(r)?;
        if results > 1 {
            return Err(GateError::InvalidModule("multi-value results unsupported"));
        }
        Ok(FuncType { params, results })
    })
}

fn decode_valtypes(r: &mut Reader<'_>) -> Result<usize, GateError> {
    let types = decode_vec(r, Reader::read_u8)?;
    if types.iter().any(|&t| t != VALTYPE_I32) {
        return Err(GateError::InvalidModule("unsupported value type"));
    }
    Ok(types.len())
}

fn decode_export(r: &mut Reader<'_>) -> Result<Export, GateError> {
    let name = r.read_name()?;
    let kind = match r.read_u8()? {
        0 => ExportKind::Func,
        1 => ExportKind::Table,
        2 => ExportKind::Memory,
        3 => ExportKind::Global,
        _ => return Err(GateError::InvalidModule("unknown export kind")),
    };
    let index = r.read_var_u32()?;
    Ok(Export { name, kind, index })
}

fn decode_body(r: &mut Reader<'_>) -> Result<FuncBody, GateError> {
    let size = r.read_var_u32()? as usize;
    let mut b = Reader::new(r.read_bytes(size)?);
    let groups = decode_vec(&mut b, |b| {
        let n = b.read_var_u32()?;
        if b.read_u8()? != VALTYPE_I32 {
            return Err(GateError::InvalidModule("unsupported local type"));
        }
        Ok(n)
    })?;
    let locals = groups
        .into_iter()
        .try_fold(0u32, u32::checked_add)
        .filter(|&n| n <= MAX_ENTRIES)
        .ok_or(GateError::InvalidModule("too many locals"))?;
    let code = b.read_bytes(size - b.position())?.to_vec();
    Ok(FuncBody { locals, code })
}
