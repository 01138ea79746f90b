#[allow(unused)]

/// 进程表最多容纳的进程数。表项从不回收，因此这也是系统生命周期内能创建的进程总数
pub const MAX_PROCESSES: usize = 1024;
/// 初始进程 initproc 的进程标识符，pid 分配器从这里开始计数；0 留给 fork 在子进程中的返回值
pub const INIT_PID: usize = 1;
