use super::{Category, Pattern, Rule, RuleScope};
use Category::{Compatible, Critical, Info, Warning};
use RuleScope::{Manifest, Source};

struct RuleDef {
    id: &'static str,
    category: Category,
    scope: RuleScope,
    substrings: &'static [&'static str],
    regexes: &'static [&'static str],
    message: &'static str,
}

impl RuleDef {
    fn to_rule(&self) -> Rule {
        let patterns = self
            .substrings
            .iter()
            .map(|s| Pattern::Substring((*s).to_string()))
            .chain(self.regexes.iter().map(|r| Pattern::Regex((*r).to_string())))
            .collect();

        Rule {
            id: self.id.to_string(),
            patterns,
            category: self.category,
            scope: self.scope,
            message_template: self.message.to_string(),
        }
    }
}

// Declaration order is report order within a category.
const BUILTIN: &[RuleDef] = &[
    // ---- critical -------------------------------------------------------
    RuleDef {
        id: "fs-module",
        category: Critical,
        scope: Source,
        substrings: &[],
        regexes: &[
            r#"require\(\s*['"](?:node:)?fs(?:/promises)?['"]\s*\)"#,
            r#"from\s+['"](?:node:)?fs(?:/promises)?['"]"#,
            r#"import\(\s*['"](?:node:)?fs(?:/promises)?['"]\s*\)"#,
        ],
        message: "Node.js fs module imported ({count} occurrences) - Workers have no filesystem; use R2, KV or static assets",
    },
    RuleDef {
        id: "sync-fs-io",
        category: Critical,
        scope: Source,
        substrings: &[],
        regexes: &[
            r"\b(?:readFileSync|writeFileSync|appendFileSync|existsSync|mkdirSync|readdirSync|statSync|unlinkSync)\s*\(",
        ],
        message: "Synchronous filesystem calls ({count} occurrences) - blocking disk I/O is unavailable in Workers",
    },
    RuleDef {
        id: "child-process",
        category: Critical,
        scope: Source,
        substrings: &["child_process"],
        regexes: &[r"\b(?:execSync|spawnSync|execFileSync)\s*\("],
        message: "Child process usage ({count} occurrences) - Workers cannot spawn processes",
    },
    RuleDef {
        id: "net-sockets",
        category: Critical,
        scope: Source,
        substrings: &[],
        regexes: &[
            r#"require\(\s*['"](?:node:)?(?:net|dgram|tls)['"]\s*\)"#,
            r#"from\s+['"](?:node:)?(?:net|dgram|tls)['"]"#,
        ],
        message: "Raw socket modules net/dgram/tls ({count} occurrences) - use the connect() TCP sockets API or fetch",
    },
    RuleDef {
        id: "http-server",
        category: Critical,
        scope: Source,
        substrings: &[],
        regexes: &[
            r"\b(?:http|https|http2)\.createServer\s*\(",
            r"\.listen\(\s*(?:process\.env\.PORT|PORT|port|\d+)",
        ],
        message: "HTTP server bootstrapping ({count} occurrences) - Workers receive requests through a fetch handler, not listen()",
    },
    RuleDef {
        id: "worker-threads",
        category: Critical,
        scope: Source,
        substrings: &[],
        regexes: &[r#"['"](?:node:)?(?:worker_threads|cluster)['"]"#],
        message: "worker_threads/cluster usage ({count} occurrences) - each Worker is a single-threaded isolate",
    },
    RuleDef {
        id: "native-addons",
        category: Critical,
        scope: Source,
        substrings: &["node-gyp", "node-pre-gyp", "prebuild-install"],
        regexes: &[
            r#"require\(\s*['"][^'"]+\.node['"]\s*\)"#,
            r#"require\(\s*['"]bindings['"]\s*\)"#,
        ],
        message: "Native addon loading ({count} occurrences) - compiled Node addons cannot run in Workers; look for a WASM build",
    },
    RuleDef {
        id: "tcp-database-driver",
        category: Critical,
        scope: Manifest,
        substrings: &[
            "\"pg\"",
            "\"mysql\"",
            "\"mysql2\"",
            "\"mongodb\"",
            "\"mongoose\"",
            "\"redis\"",
            "\"ioredis\"",
            "\"oracledb\"",
            "\"mssql\"",
        ],
        regexes: &[],
        message: "TCP database driver dependencies ({count} occurrences) - route through Hyperdrive, D1 or an HTTP data API",
    },
    RuleDef {
        id: "native-dependency",
        category: Critical,
        scope: Manifest,
        substrings: &[
            "\"sharp\"",
            "\"bcrypt\"",
            "\"canvas\"",
            "\"sqlite3\"",
            "\"better-sqlite3\"",
            "\"puppeteer\"",
            "\"node-sass\"",
        ],
        regexes: &[],
        message: "Dependencies with native bindings ({count} occurrences) - replace with WASM builds or platform services",
    },
    // ---- warning --------------------------------------------------------
    RuleDef {
        id: "process-env",
        category: Warning,
        scope: Source,
        substrings: &[],
        regexes: &[r"\bprocess\.env\b"],
        message: "process.env access ({count} occurrences) - read configuration from the env bindings passed to fetch()",
    },
    RuleDef {
        id: "buffer-usage",
        category: Warning,
        scope: Source,
        substrings: &[],
        regexes: &[
            r"\bBuffer\.(?:from|alloc|allocUnsafe|concat|isBuffer|byteLength)\b",
            r"\bnew\s+Buffer\s*\(",
        ],
        message: "Node Buffer usage ({count} occurrences) - needs the nodejs_compat flag or Uint8Array/TextEncoder",
    },
    RuleDef {
        id: "dirname-filename",
        category: Warning,
        scope: Source,
        substrings: &[],
        regexes: &[r"\b__(?:dirname|filename)\b"],
        message: "__dirname/__filename usage ({count} occurrences) - there is no module path on disk in Workers",
    },
    RuleDef {
        id: "node-crypto",
        category: Warning,
        scope: Source,
        substrings: &[],
        regexes: &[
            r#"require\(\s*['"](?:node:)?crypto['"]\s*\)"#,
            r#"from\s+['"](?:node:)?crypto['"]"#,
        ],
        message: "Node crypto module ({count} occurrences) - prefer Web Crypto (crypto.subtle) or enable nodejs_compat",
    },
    RuleDef {
        id: "node-path",
        category: Warning,
        scope: Source,
        substrings: &[],
        regexes: &[
            r#"require\(\s*['"](?:node:)?path['"]\s*\)"#,
            r#"from\s+['"](?:node:)?path['"]"#,
        ],
        message: "Node path module ({count} occurrences) - available only with the nodejs_compat flag",
    },
    RuleDef {
        id: "long-running-timers",
        category: Warning,
        scope: Source,
        substrings: &[],
        regexes: &[r"\bsetInterval\s*\("],
        message: "setInterval timers ({count} occurrences) - isolates do not outlive requests; use Cron Triggers or Durable Object alarms",
    },
    RuleDef {
        id: "express-app",
        category: Warning,
        scope: Source,
        substrings: &[],
        regexes: &[
            r"\bexpress\(\s*\)",
            r#"require\(\s*['"]express['"]\s*\)"#,
            r#"from\s+['"]express['"]"#,
        ],
        message: "Express application code ({count} occurrences) - port routes to Hono or a plain fetch handler",
    },
    RuleDef {
        id: "multipart-upload",
        category: Warning,
        scope: Source,
        substrings: &["multer", "formidable", "busboy"],
        regexes: &[],
        message: "Multipart upload middleware ({count} occurrences) - use request.formData() and stream large files to R2",
    },
    RuleDef {
        id: "vercel-sdk",
        category: Warning,
        scope: Source,
        substrings: &[],
        regexes: &[r"@vercel/(?:kv|postgres|blob|edge-config|og|functions)\b"],
        message: "Vercel platform SDKs ({count} occurrences) - swap for Workers KV, Hyperdrive/D1 or R2",
    },
    RuleDef {
        id: "lambda-context",
        category: Warning,
        scope: Source,
        substrings: &[],
        regexes: &[
            r"\bcontext\.(?:getRemainingTimeInMillis|callbackWaitsForEmptyEventLoop|awsRequestId)\b",
            r"\bexports\.handler\s*=",
            r"\bexport\s+(?:const|async\s+function|function)\s+handler\b",
        ],
        message: "AWS Lambda handler conventions ({count} occurrences) - rewrite as export default { fetch(request, env, ctx) }",
    },
    RuleDef {
        id: "aws-sdk",
        category: Warning,
        scope: Source,
        substrings: &["aws-sdk", "@aws-sdk/"],
        regexes: &[],
        message: "AWS SDK usage ({count} occurrences) - replace S3/DynamoDB calls with R2/D1 bindings where possible",
    },
    RuleDef {
        id: "orm-dependency",
        category: Warning,
        scope: Manifest,
        substrings: &[
            "\"prisma\"",
            "\"@prisma/client\"",
            "\"typeorm\"",
            "\"sequelize\"",
            "\"knex\"",
        ],
        regexes: &[],
        message: "ORM dependencies ({count} occurrences) - verify driver adapter support for Workers",
    },
    // ---- info -----------------------------------------------------------
    RuleDef {
        id: "next-api-routes",
        category: Info,
        scope: Source,
        substrings: &["NextApiRequest", "NextApiResponse", "getServerSideProps"],
        regexes: &[],
        message: "Next.js API routes or SSR data hooks ({count} occurrences) - deploy through the OpenNext Cloudflare adapter",
    },
    RuleDef {
        id: "dotenv",
        category: Info,
        scope: Source,
        substrings: &[],
        regexes: &[r#"['"]dotenv(?:/config)?['"]"#],
        message: "dotenv loading ({count} occurrences) - use wrangler secrets and .dev.vars instead",
    },
    RuleDef {
        id: "console-logging",
        category: Info,
        scope: Source,
        substrings: &[],
        regexes: &[r"\bconsole\.(?:log|info|warn|error|debug)\s*\("],
        message: "console logging ({count} occurrences) - visible through wrangler tail and Workers Logs",
    },
    RuleDef {
        id: "cron-jobs",
        category: Info,
        scope: Source,
        substrings: &["node-cron"],
        regexes: &[r"\bcron\.schedule\s*\("],
        message: "In-process cron scheduling ({count} occurrences) - move schedules to Cron Triggers",
    },
    RuleDef {
        id: "websocket-server",
        category: Info,
        scope: Source,
        substrings: &["socket.io"],
        regexes: &[
            r"\bnew\s+WebSocketServer\s*\(",
            r#"from\s+['"]ws['"]"#,
            r#"require\(\s*['"]ws['"]\s*\)"#,
        ],
        message: "WebSocket server code ({count} occurrences) - use WebSocketPair, ideally inside a Durable Object",
    },
    // ---- compatible -----------------------------------------------------
    RuleDef {
        id: "fetch-api",
        category: Compatible,
        scope: Source,
        substrings: &[],
        regexes: &[r"\bfetch\s*\("],
        message: "fetch() calls ({count} occurrences) - natively supported",
    },
    RuleDef {
        id: "web-crypto",
        category: Compatible,
        scope: Source,
        substrings: &[],
        regexes: &[
            r"\bcrypto\.subtle\b",
            r"\bcrypto\.randomUUID\s*\(",
            r"\bcrypto\.getRandomValues\s*\(",
        ],
        message: "Web Crypto API ({count} occurrences) - natively supported",
    },
    RuleDef {
        id: "web-streams",
        category: Compatible,
        scope: Source,
        substrings: &[],
        regexes: &[r"\b(?:ReadableStream|WritableStream|TransformStream)\b"],
        message: "Web Streams ({count} occurrences) - natively supported",
    },
    RuleDef {
        id: "request-response",
        category: Compatible,
        scope: Source,
        substrings: &[],
        regexes: &[r"\bnew\s+(?:Response|Request|Headers)\s*\("],
        message: "Request/Response/Headers objects ({count} occurrences) - natively supported",
    },
    RuleDef {
        id: "url-api",
        category: Compatible,
        scope: Source,
        substrings: &[],
        regexes: &[r"\bnew\s+URL\s*\(", r"\bURLSearchParams\b"],
        message: "URL and URLSearchParams ({count} occurrences) - natively supported",
    },
    RuleDef {
        id: "hono",
        category: Compatible,
        scope: Source,
        substrings: &[],
        regexes: &[r#"from\s+['"]hono(?:/[^'"]*)?['"]"#],
        message: "Hono framework ({count} occurrences) - runs on Workers unchanged",
    },
    RuleDef {
        id: "edge-runtime",
        category: Compatible,
        scope: Source,
        substrings: &[],
        regexes: &[r#"runtime\s*[:=]\s*['"]edge['"]"#],
        message: "Edge runtime declarations ({count} occurrences) - code already targets a Workers-like runtime",
    },
];

/// The built-in rule table, in declaration order.
#[must_use]
pub fn builtin_rules() -> Vec<Rule> {
    BUILTIN.iter().map(RuleDef::to_rule).collect()
}

#[cfg(test)]
#[path = "builtin_tests.rs"]
mod tests;
