use crate::{errors::GateError, module::{Module, Reader}};

mod op {
    pub const UNREACHABLE: u8 = 0x00;
    pub const NOP: u8 = 0x01;
    pub const END: u8 = 0x0b;
    pub const RETURN: u8 = 0x0f;
    pub const DROP: u8 = 0x1a;
    pub const SELECT: u8 = 0x1b;
    pub const LOCAL_GET: u8 = 0x20;
    pub const LOCAL_SET: u8 = 0x21;
    pub const LOCAL_TEE: u8 = 0x22;
    pub const I32_CONST: u8 = 0x41;
    pub const I32_EQZ: u8 = 0x45;
    pub const I32_EQ: u8 = 0x46;
    pub const I32_NE: u8 = 0x47;
    pub const I32_ADD: u8 = 0x6a;
    pub const I32_SUB: u8 = 0x6b;
    pub const I32_MUL: u8 = 0x6c;
    pub const I32_AND: u8 = 0x71;
    pub const I32_OR: u8 = 0x72;
    pub const I32_XOR: u8 = 0x73;
    pub const I32_SHL: u8 = 0x74;
    pub const I32_SHR_S: u8 = 0x75;
    pub const I32_SHR_U: u8 = 0x76;
}

// Bodies are straight-line, so the stack can never outgrow the code.
struct Stack(Vec<i32>);

impl Stack {
    fn push(&mut self, v: i32) { self.0.push(v); }

    fn pop(&mut self) -> Result<i32, GateError> {
        self.0.pop().ok_or(GateError::InvalidModule("operand stack underflow"))
    }

    fn binary(&mut self, f: impl FnOnce(i32, i32) -> i32) -> Result<(), GateError> {
        let b = self.pop()?;
        let a = self.pop()?;
        self.push(f(a, b));
        Ok(())
    }
}

const fn bits(v: i32) -> u32 { u32::from_ne_bytes(v.to_ne_bytes()) }
const fn from_bits(v: u32) -> i32 { i32::from_ne_bytes(v.to_ne_bytes()) }
const fn shift_count(v: i32) -> u32 { bits(v) & 31 }

/// Run function `func` of `module` with `args`, returning its result if it has one.
///
/// # Errors
///
/// Returns `GateError::TrapExecuted` when the body reaches `unreachable`,
/// `GateError::UnsupportedOpcode` for instructions outside the supported subset,
/// and `GateError::InvalidModule` or `GateError::ArityMismatch` for malformed calls.
pub fn invoke(module: &Module, func: u32, args: &[i32]) -> Result<Option<i32>, GateError> {
    let ty = module.func_type(func).ok_or(GateError::InvalidModule("function index out of range"))?;
    if args.len() != ty.params {
        return Err(GateError::ArityMismatch { expected: ty.params, got: args.len() });
    }
    let body = module.body(func).ok_or(GateError::InvalidModule("missing function body"))?;

    let mut locals = args.to_vec();
    locals.resize(args.len() + body.locals as usize, 0);
    let mut stack = Stack(Vec::with_capacity(8));
    let mut code = Reader::new(&body.code);

    loop {
        match code.read_u8()? {
            op::UNREACHABLE => return Err(GateError::TrapExecuted),
            op::NOP => {}
            op::END | op::RETURN => break,
            op::DROP => { stack.pop()?; }
            op::SELECT => {
                let cond = stack.pop()?;
                let b = stack.pop()?;
                let a = stack.pop()?;
                stack.push(if cond != 0 { a } else { b });
            }
            op::LOCAL_GET => {
                let slot = local_slot(&mut code, &locals)?;
                stack.push(locals[slot]);
            }
            op::LOCAL_SET => {
                let slot = local_slot(&mut code, &locals)?;
                locals[slot] = stack.pop()?;
            }
            op::LOCAL_TEE => {
                let slot = local_slot(&mut code, &locals)?;
                let v = stack.pop()?;
                locals[slot] = v;
                stack.push(v);
            }
            op::I32_CONST => stack.push(code.read_var_i32()?),
            op::I32_EQZ => {
                let v = stack.pop()?;
                stack.push(i32::from(v == 0));
            }
            op::I32_EQ => stack.binary(|a, b| i32::from(a == b))?,
            op::I32_NE => stack.binary(|a, b| i32::from(a != b))?,
            op::I32_ADD => stack.binary(i32::wrapping_add)?,
            op::I32_SUB => stack.binary(i32::wrapping_sub)?,
            op::I32_MUL => stack.binary(i32::wrapping_mul)?,
            op::I32_AND => stack.binary(|a, b| a & b)?,
            op::I32_OR => stack.binary(|a, b| a | b)?,
            op::I32_XOR => stack.binary(|a, b| a ^ b)?,
            op::I32_SHL => stack.binary(|a, b| a.wrapping_shl(shift_count(b)))?,
            op::I32_SHR_S => stack.binary(|a, b| a.wrapping_shr(shift_count(b)))?,
            op::I32_SHR_U => stack.binary(|a, b| from_bits(bits(a).wrapping_shr(shift_count(b))))?,
            other => return Err(GateError::UnsupportedOpcode(other)),
        }
    }

    match ty.results {
        0 => Ok(None),
        _ => stack.pop().map(Some),
    }
}

fn local_slot(code: &mut Reader<'_>, locals: &[i32]) -> Result<usize, GateError> {
    let slot = code.read_var_u32()? as usize;
    if slot < locals.len() {
        Ok(slot)
    } else {
        Err(GateError::InvalidModule("local index out of range"))
    }
}
