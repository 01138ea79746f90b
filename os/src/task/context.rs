/// User registers saved on entry to the kernel.
///
/// Only the parts the lifecycle core touches are modelled: the general purpose
/// registers (syscall id in `a7`, arguments and return value in `a0..`) and
/// the resume address. The trap handler has already moved `sepc` past the
/// `ecall` by the time a syscall runs, so a copied context resumes after it.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TrapContext {
    pub x: [usize; 32],
    pub sepc: usize,
}

const A0: usize = 10;
const A7: usize = 17;

impl TrapContext {
    pub fn zero_init() -> Self {
        Self { x: [0; 32], sepc: 0 }
    }

    /// Context for a syscall `id` with up to three arguments, resuming at `sepc`.
    pub fn syscall(id: usize, args: [usize; 3], sepc: usize) -> Self {
        let mut cx = Self::zero_init();
        cx.x[A7] = id;
        cx.x[A0..A0 + 3].copy_from_slice(&args);
        cx.sepc = sepc;
        cx
    }

    pub fn syscall_id(&self) -> usize {
        self.x[A7]
    }

    pub fn syscall_args(&self) -> [usize; 3] {
        [self.x[A0], self.x[A0 + 1], self.x[A0 + 2]]
    }

    //系统调用的返回值放在 a0 寄存器中
    pub fn set_return_value(&mut self, value: usize) {
        self.x[A0] = value;
    }

    pub fn return_value(&self) -> usize {
        self.x[A0]
    }
}
