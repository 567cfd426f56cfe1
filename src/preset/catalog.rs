//! Built-in workflow scenarios.

use serde::Serialize;

/// A predefined development-workflow archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Unique slug
    pub id: &'static str,

    /// Display title
    pub title: &'static str,

    /// Trigger keywords, matched case-insensitively as substrings
    pub keywords: &'static [&'static str],

    /// One-paragraph description
    pub summary: &'static str,

    /// Ordered per-step advice
    pub recommendations: &'static [&'static str],

    /// Prompt to hand to the assistant at the start of a session
    pub guidance_prompt: &'static str,
}

/// Id of the fallback scenario.
pub const GENERAL_ID: &str = "general";

static SCENARIOS: [Scenario; 4] = [
    Scenario {
        id: "feature",
        title: "新功能开发",
        keywords: &["新增", "新功能", "feature", "实现", "开发", "添加", "构建", "需求"],
        summary: "聚焦新增能力，强调用户故事、验收标准与上线路径。",
        recommendations: &[
            "requirements 阶段梳理用户故事、验收标准与影响范围。",
            "plan 阶段列出数据流、接口、依赖与风险，必要时补充原型。",
            "impl 阶段按 todos 顺序推进，每完成一项就更新说明与提交记录。",
            "build-check 前完成自测，确认关键路径与监控已就绪。",
        ],
        guidance_prompt: "本次任务是新增功能：requirements 中写清用户故事与验收标准，plan 阶段拆解技术实现，impl 阶段按 todos 推进并记录关键提交。",
    },
    Scenario {
        id: "bugfix",
        title: "缺陷修复",
        keywords: &["修复", "bug", "缺陷", "问题", "异常", "故障", "报错", "崩溃", "fix"],
        summary: "定位并修正现有问题，强调复现、根因分析与回归测试。",
        recommendations: &[
            "requirements 阶段记录复现步骤、期望与实际结果及影响范围。",
            "plan 阶段梳理可能的根因、排查路径与涉及的模块。",
            "impl 阶段记录每次验证的结果，确认根因后再落地修复。",
            "build-check 与测试中重点覆盖回归用例与边界条件。",
        ],
        guidance_prompt: "本次任务是缺陷修复：requirements 中说明复现步骤与影响，plan 阶段规划排查方案，impl 阶段记录根因验证与修复细节，并补充回归测试。",
    },
    Scenario {
        id: "architecture",
        title: "架构设计 / 演进规划",
        keywords: &["架构", "设计", "重构", "扩展", "规划", "演进", "方案", "抽象", "refactor"],
        summary: "围绕系统抽象与演进做规划，强调权衡、风险与路线图。",
        recommendations: &[
            "requirements 阶段明确业务目标、约束、成功指标与非目标。",
            "plan 阶段输出方案对比、权衡分析以及迁移或演进策略。",
            "todos 中列出 spike、PoC 与里程碑拆分，并标明依赖关系。",
            "summary 中沉淀决策记录、后续行动与风险缓解措施。",
        ],
        guidance_prompt: "本次任务以架构设计为主：聚焦方案制定与权衡，输出对比、风险与迁移计划，需要代码时以 PoC 或脚手架佐证。",
    },
    Scenario {
        id: "testing",
        title: "测试与质量保障",
        keywords: &["测试", "test", "覆盖率", "验证", "质量", "回归", "自动化", "用例", "checks"],
        summary: "建设和加固测试体系，关注验证策略、用例设计与质量指标。",
        recommendations: &[
            "requirements 中声明验证目标、风险领域与衡量标准（覆盖率、缺陷率等）。",
            "plan 阶段列出测试分层、工具、数据准备与环境依赖。",
            "todos 中细化用例、脚本实现、CI 集成与报告输出。",
            "summary 中总结测试结果、缺陷分布与改进项。",
        ],
        guidance_prompt: "本次任务聚焦测试与质量：输出验证范围、用例设计、自动化脚本与指标收敛情况，并在 impl 阶段补充测试代码与报告。",
    },
];

static GENERAL: Scenario = Scenario {
    id: GENERAL_ID,
    title: "通用开发流程",
    keywords: &[],
    summary: "无法匹配特定场景时的默认流程，依然遵循 DevFlow 七步法。",
    recommendations: &[
        "requirements 阶段澄清目标、约束、依赖与验收标准。",
        "plan 阶段拆解任务、识别风险并制定验证策略。",
        "impl 阶段持续同步进度、提交记录与测试结果。",
        "保持 steps 与 state.json 最新，方便助手随时接力。",
    ],
    guidance_prompt: "请按通用 DevFlow 流程推进，确保每个阶段的产出齐全，并在实现阶段同步提交记录与验证结果。",
};

/// Immutable table of scenarios plus the fallback.
#[derive(Debug, Clone, Copy)]
pub struct PresetCatalog {
    scenarios: &'static [Scenario],
    fallback: &'static Scenario,
}

impl PresetCatalog {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self { scenarios: &SCENARIOS, fallback: &GENERAL }
    }

    /// Build a catalog from static tables.
    pub const fn new(scenarios: &'static [Scenario], fallback: &'static Scenario) -> Self {
        Self { scenarios, fallback }
    }

    /// Keyword-bearing scenarios, in catalog order.
    pub fn scenarios(&self) -> &'static [Scenario] {
        self.scenarios
    }

    /// Scenario chosen when nothing matches.
    pub fn fallback(&self) -> &'static Scenario {
        self.fallback
    }

    /// Every scenario, fallback last.
    pub fn all(&self) -> impl Iterator<Item = &'static Scenario> {
        self.scenarios.iter().chain(std::iter::once(self.fallback))
    }

    /// Find a scenario by id.
    pub fn get(&self, id: &str) -> Option<&'static Scenario> {
        self.all().find(|scenario| scenario.id == id)
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let catalog = PresetCatalog::builtin();
        let ids: HashSet<&str> = catalog.all().map(|s| s.id).collect();
        assert_eq!(ids.len(), catalog.all().count());
    }

    #[test]
    fn test_exactly_one_general_without_keywords() {
        let catalog = PresetCatalog::builtin();
        let generals: Vec<_> = catalog.all().filter(|s| s.id == GENERAL_ID).collect();
        assert_eq!(generals.len(), 1);
        assert!(generals[0].keywords.is_empty());
        assert_eq!(catalog.fallback().id, GENERAL_ID);
    }

    #[test]
    fn test_every_keyed_scenario_has_guidance() {
        for scenario in PresetCatalog::builtin().scenarios() {
            assert!(!scenario.keywords.is_empty(), "{} has no keywords", scenario.id);
            assert!(!scenario.recommendations.is_empty());
            assert!(!scenario.guidance_prompt.is_empty());
        }
    }

    #[test]
    fn test_get() {
        let catalog = PresetCatalog::builtin();
        assert_eq!(catalog.get("bugfix").map(|s| s.title), Some("缺陷修复"));
        assert!(catalog.get("general").is_some());
        assert!(catalog.get("nope").is_none());
    }
}
