pub mod parser;
pub mod runner;

pub use runner::NmapRunner;

/// 一个 NSE 脚本的输出
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptOutput {
    pub id: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortResult {
    pub portid: u16,
    pub proto: String,
    pub state: String,
    pub service: String,
    pub scripts: Vec<ScriptOutput>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostResult {
    pub addr: String,
    pub hostname: Option<String>,
    pub ports: Vec<PortResult>,
    pub scripts: Vec<ScriptOutput>,
}

impl PortResult {
    /// 按脚本 id 查找输出
    pub fn script(&self, id: &str) -> Option<&str> {
        self.scripts
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.output.as_str())
    }
}

/// 外部扫描引擎: 接收参数, 返回按主机/端口组织的结果
#[allow(async_fn_in_trait)]
pub trait Scanner {
    async fn run(&self, args: &[String]) -> anyhow::Result<Vec<HostResult>>;
}
