use crate::platform::Platform;

const VERCEL: &[&str] = &[
    "Replace Vercel serverless functions with Worker fetch handlers (`export default { fetch }`)",
    "Move @vercel/kv to Workers KV and @vercel/blob to R2",
    "Translate vercel.json rewrites and headers into Worker routing or _routes.json",
    "Map Vercel environment variables to wrangler.toml vars and secrets",
    "Use Cloudflare Pages for static assets",
];

const LAMBDA: &[&str] = &[
    "Rewrite `handler(event, context)` functions as `fetch(request, env, ctx)` handlers",
    "Replace API Gateway event parsing with the standard Request object",
    "Move S3 access to R2 and DynamoDB access to D1 or KV",
    "Replace CloudWatch scheduled events with Cron Triggers",
    "Port serverless.yml or SAM resources to wrangler.toml bindings",
];

const NEXTJS: &[&str] = &[
    "Deploy with the OpenNext Cloudflare adapter or @cloudflare/next-on-pages",
    "Mark API routes and middleware with the edge runtime",
    "Replace Node.js-only dependencies used by getServerSideProps",
    "Serve next/image through Cloudflare Images or a custom loader",
];

const EXPRESS: &[&str] = &[
    "Port Express routes to Hono, which keeps a similar routing API on Workers",
    "Replace Express middleware with Hono middleware or inline request handling",
    "Remove app.listen(); Workers receive requests through the fetch handler",
    "Replace body-parser and multer with Request.json() and Request.formData()",
];

const GENERIC_NODE: &[&str] = &[
    "Enable the nodejs_compat compatibility flag for partial Node.js API support",
    "Replace filesystem access with R2, KV or bundled static assets",
    "Replace TCP database drivers with Hyperdrive or HTTP-based drivers",
    "Move configuration from process.env to Worker bindings",
    "Test locally with `wrangler dev` before deploying",
];

/// Fixed remediation steps for a platform, in presentation order.
#[must_use]
pub const fn recommendations_for(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Vercel => VERCEL,
        Platform::Lambda => LAMBDA,
        Platform::NextJs => NEXTJS,
        Platform::Express => EXPRESS,
        Platform::GenericNode => GENERIC_NODE,
    }
}
